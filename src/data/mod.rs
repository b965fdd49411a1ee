/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  salarios_dados.csv (12 columns, any header names)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  positional parse → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, version
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year ∈ years ∧ level ∈ levels → sub-Dataset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
