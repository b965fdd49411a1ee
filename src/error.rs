use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Field;

// ---------------------------------------------------------------------------
// Error taxonomy for loading and aggregation
// ---------------------------------------------------------------------------

/// Errors raised by the data layer and the aggregator.
///
/// Load errors (`FileNotFound`, `SchemaMismatch`, `Parse`, `Csv`, `Io`) are
/// terminal for a session. `EmptyInput` is expected during normal use and is
/// turned into an `N/A` placeholder by the summary layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{}: expected {expected} columns, found {found}", location(*line))]
    SchemaMismatch {
        expected: usize,
        found: usize,
        /// 1-based line in the file; `None` for the header row.
        line: Option<u64>,
    },

    #[error("CSV line {line}: {}: {message}", column.map_or("?", Field::source_name))]
    Parse {
        /// 1-based line in the file.
        line: u64,
        column: Option<Field>,
        message: String,
    },

    #[error("{operation} of an empty dataset")]
    EmptyInput { operation: &'static str },

    #[error("field '{field}' is not numeric")]
    NonNumericField { field: Field },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn location(line: Option<u64>) -> String {
    match line {
        Some(l) => format!("CSV line {l}"),
        None => "CSV header".to_string(),
    }
}

impl DashboardError {
    /// Whether this error is the recoverable "nothing to aggregate" case.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, DashboardError::EmptyInput { .. })
    }
}
