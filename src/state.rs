use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::SummaryCache;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::FilterSelection;
use crate::data::loader::load_csv;
use crate::data::model::Dataset;
use crate::summary::{DashboardSummary, SummaryOptions};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Where the dataset came from.
    pub source_path: Option<PathBuf>,

    /// Current year / level selection.
    pub selection: FilterSelection,

    /// Summary for the current selection (shared with the cache).
    pub summary: Option<Arc<DashboardSummary>>,

    /// Colours per experience level.
    pub level_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub options: SummaryOptions,

    cache: SummaryCache,
}

impl AppState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            dataset: None,
            source_path: None,
            selection: FilterSelection::default(),
            summary: None,
            level_colors: None,
            status_message: None,
            options: SummaryOptions::from(config),
            cache: SummaryCache::new(config.cache_capacity),
        }
    }

    /// Ingest a newly loaded dataset, select everything and summarise.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<PathBuf>) {
        self.selection = FilterSelection::all(&dataset);
        self.level_colors = Some(ColorMap::new(&self.options.level_order, &dataset.levels()));
        self.cache.clear();
        self.dataset = Some(dataset);
        self.source_path = source;
        self.status_message = None;
        self.refresh();
    }

    /// Load `path` and replace the current dataset. On failure the current
    /// dataset stays and the error is shown in the status bar.
    pub fn open_path(&mut self, path: &Path) {
        match load_csv(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute (or fetch) the summary for the current selection.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.summary = None;
            return;
        };
        match self.cache.get_or_compute(ds, &self.selection, &self.options) {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => {
                log::error!("Aggregation failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.summary = None;
            }
        }
    }

    pub fn toggle_year(&mut self, year: i32) {
        self.selection.toggle_year(year);
        self.refresh();
    }

    pub fn toggle_level(&mut self, level: &str) {
        self.selection.toggle_level(level);
        self.refresh();
    }

    pub fn select_all_years(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.years = ds.years();
            self.refresh();
        }
    }

    pub fn select_no_years(&mut self) {
        self.selection.years.clear();
        self.refresh();
    }

    pub fn select_all_levels(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.levels = ds.levels().into_iter().collect();
            self.refresh();
        }
    }

    pub fn select_no_levels(&mut self) {
        self.selection.levels.clear();
        self.refresh();
    }

    /// Cache (hits, misses), for the status bar.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rec = |year: i32, level: &str| Record {
            year,
            experience_level: level.into(),
            contract_type: "CLT".into(),
            job_title: "Analyst".into(),
            salary: Some(1.0),
            currency: "USD".into(),
            salary_usd: Some(100.0),
            employee_residence: "BR".into(),
            work_arrangement: "remoto".into(),
            company_location: "BR".into(),
            company_size: "M".into(),
            country_iso: "BRA".into(),
        };
        Dataset::from_records(vec![rec(2023, "junior"), rec(2024, "senior")])
    }

    #[test]
    fn loading_selects_everything() {
        let mut state = AppState::new(&DashboardConfig::default());
        state.set_dataset(dataset(), None);
        let summary = state.summary.clone().unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(state.selection.years.len(), 2);
    }

    #[test]
    fn toggles_refresh_summary_and_reuse_cache() {
        let mut state = AppState::new(&DashboardConfig::default());
        state.set_dataset(dataset(), None);

        // Load computes the full selection.
        assert_eq!(state.cache_stats(), (0, 1));

        state.toggle_level("senior");
        assert_eq!(state.summary.as_ref().unwrap().record_count, 1);
        assert_eq!(state.cache_stats(), (0, 2));

        state.select_no_years();
        assert_eq!(state.summary.as_ref().unwrap().record_count, 0);
        assert_eq!(state.summary.as_ref().unwrap().median_usd, None);
        assert_eq!(state.cache_stats(), (0, 3));

        // Back to {all years, junior}: seen after the level toggle.
        state.select_all_years();
        assert_eq!(state.summary.as_ref().unwrap().record_count, 1);
        assert_eq!(state.cache_stats(), (1, 3));

        // Back to the full selection computed on load.
        state.select_all_levels();
        assert_eq!(state.summary.as_ref().unwrap().record_count, 2);
        assert_eq!(state.cache_stats(), (2, 3));
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut state = AppState::new(&DashboardConfig::default());
        state.set_dataset(dataset(), None);
        state.open_path(Path::new("/no/such/file.csv"));
        assert!(state.dataset.is_some());
        assert!(state.status_message.as_deref().unwrap().contains("not found"));
    }
}
