//! Grouped statistics over a [`Dataset`].
//!
//! Every function here is pure: it reads a dataset and returns plain data.
//! Missing salary cells are skipped the way a spreadsheet skips blanks.
//! Reductions that are undefined on zero values (`mean`, `median`) return
//! [`DashboardError::EmptyInput`] instead of producing `NaN`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::data::model::{Dataset, Field, FieldValue};
use crate::error::DashboardError;

/// Number of records.
pub fn count(dataset: &Dataset) -> usize {
    dataset.len()
}

/// Arithmetic mean of a numeric field.
pub fn mean(dataset: &Dataset, field: Field) -> Result<f64, DashboardError> {
    let values = numeric_values(dataset, field)?;
    mean_of(&values).ok_or(DashboardError::EmptyInput { operation: "mean" })
}

/// Median of a numeric field. Even-sized inputs average the two middle values.
pub fn median(dataset: &Dataset, field: Field) -> Result<f64, DashboardError> {
    let mut values = numeric_values(dataset, field)?;
    median_of(&mut values).ok_or(DashboardError::EmptyInput {
        operation: "median",
    })
}

/// Number of distinct non-missing values of `field`; 0 for an empty dataset.
pub fn distinct_count(dataset: &Dataset, field: Field) -> usize {
    dataset
        .records()
        .iter()
        .filter_map(|r| r.value(field))
        .collect::<HashSet<_>>()
        .len()
}

fn numeric_values(dataset: &Dataset, field: Field) -> Result<Vec<f64>, DashboardError> {
    if !field.is_numeric() {
        return Err(DashboardError::NonNumericField { field });
    }
    Ok(dataset
        .records()
        .iter()
        .filter_map(|r| r.numeric(field))
        .collect())
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median_of(values: &mut [f64]) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    quantile(values, 0.5)
}

/// Quantile `q` (0..=1) of an already sorted slice, interpolating linearly
/// between the two closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

// ---------------------------------------------------------------------------
// Grouped reductions
// ---------------------------------------------------------------------------

/// A statistic per category, in first-appearance order unless re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupedSummary {
    entries: Vec<(FieldValue, f64)>,
}

impl GroupedSummary {
    pub fn entries(&self) -> &[(FieldValue, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys ascending (e.g. years for a trend line).
    pub fn sorted_by_key(mut self) -> Self {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// Values descending, ties by key ascending.
    pub fn sorted_by_value_desc(mut self) -> Self {
        sort_desc(&mut self.entries);
        self
    }

    pub fn into_entries(self) -> Vec<(FieldValue, f64)> {
        self.entries
    }
}

impl FromIterator<(FieldValue, f64)> for GroupedSummary {
    fn from_iter<I: IntoIterator<Item = (FieldValue, f64)>>(iter: I) -> Self {
        GroupedSummary {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Partition `dataset` by `group_field`, keeping first-appearance order.
fn partition(
    dataset: &Dataset,
    group_field: Field,
    value_field: Field,
) -> Result<Vec<(FieldValue, Vec<f64>)>, DashboardError> {
    if !value_field.is_numeric() {
        return Err(DashboardError::NonNumericField { field: value_field });
    }

    let mut index: HashMap<FieldValue, usize> = HashMap::new();
    let mut groups: Vec<(FieldValue, Vec<f64>)> = Vec::new();

    for record in dataset.records() {
        let (Some(value), Some(key)) = (record.numeric(value_field), record.value(group_field))
        else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }

    Ok(groups)
}

/// Median of `value_field` within each `group_field` partition.
pub fn grouped_median(
    dataset: &Dataset,
    group_field: Field,
    value_field: Field,
) -> Result<GroupedSummary, DashboardError> {
    Ok(partition(dataset, group_field, value_field)?
        .into_iter()
        .filter_map(|(key, mut values)| median_of(&mut values).map(|m| (key, m)))
        .collect())
}

/// Mean of `value_field` within each `group_field` partition.
pub fn grouped_mean(
    dataset: &Dataset,
    group_field: Field,
    value_field: Field,
) -> Result<GroupedSummary, DashboardError> {
    Ok(partition(dataset, group_field, value_field)?
        .into_iter()
        .filter_map(|(key, values)| mean_of(&values).map(|m| (key, m)))
        .collect())
}

fn sort_desc(entries: &mut [(FieldValue, f64)]) {
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

/// The `n` largest groups, value descending and ties broken by key ascending.
pub fn top_n(result: &GroupedSummary, n: usize) -> Vec<(FieldValue, f64)> {
    let mut sorted = result.entries.clone();
    sort_desc(&mut sorted);
    sorted.truncate(n);
    sorted
}

/// The elements of `canonical` that occur as values of `field`, in canonical
/// order. Values missing from `canonical` are dropped.
pub fn category_order<S: AsRef<str>>(
    dataset: &Dataset,
    field: Field,
    canonical: &[S],
) -> Vec<String> {
    let present: HashSet<String> = dataset
        .records()
        .iter()
        .filter_map(|r| r.value(field))
        .map(|v| v.to_string())
        .collect();
    canonical
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| present.contains(*c))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution summaries (box plots)
// ---------------------------------------------------------------------------

/// Five-number summary of one category, with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub category: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise a non-empty set of observations.
    pub fn from_values(category: impl Into<String>, mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);
        let q1 = quantile(&values, 0.25)?;
        let median = quantile(&values, 0.5)?;
        let q3 = quantile(&values, 0.75)?;
        let iqr = q3 - q1;
        let fences = (q1 - 1.5 * iqr)..=(q3 + 1.5 * iqr);

        let (inside, outliers): (Vec<f64>, Vec<f64>) =
            values.iter().copied().partition(|v| fences.contains(v));
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(BoxStats {
            category: category.into(),
            count: values.len(),
            min: values[0],
            q1,
            median,
            q3,
            max: values[values.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// One [`BoxStats`] per category of `order`, skipping categories with no rows.
pub fn box_stats<S: AsRef<str>>(
    dataset: &Dataset,
    group_field: Field,
    value_field: Field,
    order: &[S],
) -> Result<Vec<BoxStats>, DashboardError> {
    let mut groups: HashMap<String, Vec<f64>> = partition(dataset, group_field, value_field)?
        .into_iter()
        .map(|(key, values)| (key.to_string(), values))
        .collect();

    Ok(order
        .iter()
        .filter_map(|cat| {
            let values = groups.remove(cat.as_ref())?;
            BoxStats::from_values(cat.as_ref(), values)
        })
        .collect())
}
