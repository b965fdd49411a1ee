//! Dashboard configuration.
//!
//! Settings come from an optional TOML file; every key has a default so an
//! empty or partial file is valid. Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// CSV file loaded at startup.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// How many job titles the ranking chart shows.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Maximum rows shown in the raw data table.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Canonical seniority order for the experience-level chart.
    #[serde(default = "default_level_order")]
    pub level_order: Vec<String>,

    /// Number of filter selections whose summaries are memoized.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    #[serde(default)]
    pub window: WindowConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            top_n: default_top_n(),
            display_limit: default_display_limit(),
            level_order: default_level_order(),
            cache_capacity: default_cache_capacity(),
            window: WindowConfig::default(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("dados/salarios_dados.csv")
}

fn default_top_n() -> usize {
    10
}

fn default_display_limit() -> usize {
    100
}

fn default_level_order() -> Vec<String> {
    ["junior", "pleno", "senior", "executivo"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_cache_capacity() -> usize {
    32
}

/// Native window geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> f32 {
    1400.0
}

fn default_height() -> f32 {
    900.0
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                log::info!("Loading config from {}", p.display());
                Self::load(p)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serialize to TOML (`--print-config`).
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.display_limit, 100);
        assert_eq!(
            config.level_order,
            vec!["junior", "pleno", "senior", "executivo"]
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = DashboardConfig::from_toml(
            r#"
            top_n = 5

            [window]
            width = 800.0
            "#,
        )
        .unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.display_limit, 100);
        assert_eq!(config.window.width, 800.0);
        assert_eq!(config.window.height, 900.0);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = DashboardConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(DashboardConfig::load(Path::new("/no/such/config.toml")).is_err());
    }
}
