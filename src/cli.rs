//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DashboardConfig;
use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;

/// Salary Insights - interactive dashboard over a salary survey CSV
///
/// Examples:
///   salary-insights dados/salarios_dados.csv
///   salary-insights data.csv --summary --year 2024 --level senior
///   salary-insights --config dashboard.toml
///   salary-insights --print-config > dashboard.toml
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file with 12 salary columns (header names are ignored)
    #[arg(value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON instead of opening the dashboard window
    #[arg(short, long)]
    pub summary: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Restrict to these years (repeatable; default: all)
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    /// Restrict to these experience levels (repeatable; default: all)
    #[arg(long = "level", value_name = "LEVEL")]
    pub levels: Vec<String>,

    /// Number of job titles in the ranking
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Maximum rows in the raw data preview
    #[arg(long, value_name = "ROWS")]
    pub limit: Option<usize>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay command-line values on a loaded configuration.
    pub fn apply(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if let Some(limit) = self.limit {
            config.display_limit = limit;
        }
    }

    /// Selection for headless mode; an empty list means "everything present".
    pub fn selection(&self, dataset: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all(dataset);
        if !self.years.is_empty() {
            selection.years = self.years.iter().copied().collect();
        }
        if !self.levels.is_empty() {
            selection.levels = self.levels.iter().cloned().collect();
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn repeated_filters_and_overrides() {
        let args = Args::parse_from([
            "salary-insights",
            "data.csv",
            "--summary",
            "--year",
            "2023",
            "--year",
            "2024",
            "--level",
            "senior",
            "--top",
            "5",
        ]);
        assert!(args.summary);
        assert!(!args.print_config);
        assert_eq!(args.years, vec![2023, 2024]);
        assert_eq!(args.levels, vec!["senior"]);

        let mut config = DashboardConfig::default();
        args.apply(&mut config);
        assert_eq!(config.data_path, PathBuf::from("data.csv"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.display_limit, 100);
    }

    #[test]
    fn printed_config_includes_overrides() {
        let args = Args::parse_from(["salary-insights", "--print-config", "--limit", "25"]);
        assert!(args.print_config);

        let mut config = DashboardConfig::default();
        args.apply(&mut config);
        let reparsed = DashboardConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(reparsed.display_limit, 25);
        assert_eq!(reparsed.top_n, 10);
    }

    #[test]
    fn empty_filters_select_everything() {
        let args = Args::parse_from(["salary-insights"]);
        let ds = Dataset::empty();
        assert_eq!(args.selection(&ds), FilterSelection::all(&ds));
        assert!(args.data.is_none());
    }
}
