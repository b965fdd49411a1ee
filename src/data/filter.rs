use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: allowed years and experience levels
// ---------------------------------------------------------------------------

/// The user's current year / experience-level selection.
///
/// An empty set means "nothing selected" and filters out every record; it is
/// never read as "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub levels: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<Y, L, S>(years: Y, levels: L) -> Self
    where
        Y: IntoIterator<Item = i32>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSelection {
            years: years.into_iter().collect(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Select every year and level present in `dataset` (show everything).
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            years: dataset.years(),
            levels: dataset.levels().into_iter().collect(),
        }
    }

    /// Whether a record passes both membership tests.
    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(&record.year) && self.levels.contains(&record.experience_level)
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.years.remove(&year) {
            self.years.insert(year);
        }
    }

    pub fn toggle_level(&mut self, level: &str) {
        if !self.levels.remove(level) {
            self.levels.insert(level.to_string());
        }
    }

    /// Smallest and largest selected year.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

/// Build the sub-dataset of matching records, preserving order.
/// `dataset` itself is left untouched.
pub fn filter(dataset: &Dataset, selection: &FilterSelection) -> Dataset {
    let records = dataset
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();
    Dataset::from_records(records)
}
