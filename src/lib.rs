//! Salary insights: load a salary survey CSV, filter it by year and
//! experience level, and summarise it for an interactive dashboard.
//!
//! ```text
//!  loader ──▶ Dataset ──▶ filter ──▶ stats / summary ──▶ cache ──▶ ui
//! ```
//!
//! Everything up to [`cache`] is plain data and has no UI dependency; the
//! [`app`] and [`ui`] modules only read [`summary::DashboardSummary`].

pub mod app;
pub mod cache;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod stats;
pub mod summary;
pub mod ui;

pub use error::DashboardError;
