//! Everything the dashboard shows for one filter selection.
//!
//! [`DashboardSummary::compute`] is the single entry point the presentation
//! layer calls; it runs the filter and every reduction, and turns
//! `EmptyInput` into `None` so the UI can print a placeholder.

use serde::Serialize;

use crate::data::filter::{filter, FilterSelection};
use crate::data::model::{Dataset, Field, FieldValue, Record};
use crate::error::DashboardError;
use crate::stats::{self, BoxStats};

/// Placeholder shown for statistics of an empty selection.
pub const NOT_AVAILABLE: &str = "N/A";

/// Knobs that shape a summary (chart sizes, table cap, level order).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryOptions {
    pub top_n: usize,
    pub display_limit: usize,
    pub level_order: Vec<String>,
}

impl From<&crate::config::DashboardConfig> for SummaryOptions {
    fn from(config: &crate::config::DashboardConfig) -> Self {
        SummaryOptions {
            top_n: config.top_n,
            display_limit: config.display_limit,
            level_order: config.level_order.clone(),
        }
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        (&crate::config::DashboardConfig::default()).into()
    }
}

/// Headline numbers and chart series for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub selection: FilterSelection,
    /// Records passing the selection.
    pub record_count: usize,
    /// Records in the whole dataset.
    pub total_count: usize,
    pub mean_usd: Option<f64>,
    pub median_usd: Option<f64>,
    pub unique_titles: usize,
    pub year_span: Option<(i32, i32)>,
    /// Median USD salary per year, years ascending.
    pub yearly_median: Vec<(FieldValue, f64)>,
    /// Mean USD salary per year, years ascending.
    pub yearly_mean: Vec<(FieldValue, f64)>,
    /// Highest-paid job titles by median USD.
    pub top_titles: Vec<(FieldValue, f64)>,
    /// Experience levels present, in canonical order.
    pub level_order: Vec<String>,
    pub level_boxes: Vec<BoxStats>,
    /// Median USD per work arrangement, highest first.
    pub arrangement_medians: Vec<(FieldValue, f64)>,
    /// First `display_limit` filtered rows.
    pub preview: Vec<Record>,
}

impl DashboardSummary {
    pub fn compute(
        dataset: &Dataset,
        selection: &FilterSelection,
        options: &SummaryOptions,
    ) -> Result<Self, DashboardError> {
        let filtered = filter(dataset, selection);
        log::debug!(
            "Summarising {} of {} records for years {:?} / levels {:?}",
            filtered.len(),
            dataset.len(),
            selection.years,
            selection.levels
        );

        let yearly_median = stats::grouped_median(&filtered, Field::Year, Field::SalaryUsd)?
            .sorted_by_key()
            .into_entries();
        let yearly_mean = stats::grouped_mean(&filtered, Field::Year, Field::SalaryUsd)?
            .sorted_by_key()
            .into_entries();
        let by_title = stats::grouped_median(&filtered, Field::JobTitle, Field::SalaryUsd)?;
        let level_order =
            stats::category_order(&filtered, Field::ExperienceLevel, options.level_order.as_slice());
        let level_boxes = stats::box_stats(
            &filtered,
            Field::ExperienceLevel,
            Field::SalaryUsd,
            level_order.as_slice(),
        )?;
        let arrangement_medians =
            stats::grouped_median(&filtered, Field::WorkArrangement, Field::SalaryUsd)?
                .sorted_by_value_desc()
                .into_entries();

        Ok(DashboardSummary {
            selection: selection.clone(),
            record_count: stats::count(&filtered),
            total_count: stats::count(dataset),
            mean_usd: or_placeholder(stats::mean(&filtered, Field::SalaryUsd))?,
            median_usd: or_placeholder(stats::median(&filtered, Field::SalaryUsd))?,
            unique_titles: stats::distinct_count(&filtered, Field::JobTitle),
            year_span: selection.year_span(),
            yearly_median,
            yearly_mean,
            top_titles: stats::top_n(&by_title, options.top_n),
            level_order,
            level_boxes,
            arrangement_medians,
            preview: filtered
                .records()
                .iter()
                .take(options.display_limit)
                .cloned()
                .collect(),
        })
    }

    /// "Showing X of Y filtered records."
    pub fn preview_caption(&self) -> String {
        format!(
            "Showing {} of {} filtered records.",
            self.preview.len(),
            self.record_count
        )
    }

    /// Headline sentence naming the selected year range.
    pub fn headline(&self) -> String {
        match self.year_span {
            Some((from, to)) => format!(
                "Maturity and trends of the global data job market between {from} and {to}."
            ),
            None => "No year selected.".to_string(),
        }
    }
}

/// Map `EmptyInput` to `None`, keep every other error.
fn or_placeholder(result: Result<f64, DashboardError>) -> Result<Option<f64>, DashboardError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_empty_input() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Format a USD amount as `$123,456`, or the placeholder when absent.
pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = v.round();
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("{sign}${}", group_thousands(rounded.abs() as u64))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Format a count with thousands separators.
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, level: &str, title: &str, arrangement: &str, usd: f64) -> Record {
        Record {
            year,
            experience_level: level.into(),
            contract_type: "CLT".into(),
            job_title: title.into(),
            salary: Some(usd),
            currency: "USD".into(),
            salary_usd: Some(usd),
            employee_residence: "BR".into(),
            work_arrangement: arrangement.into(),
            company_location: "BR".into(),
            company_size: "M".into(),
            country_iso: "BRA".into(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec(2024, "senior", "Engineer", "presencial", 160_000.0),
            rec(2023, "junior", "Analyst", "remoto", 50_000.0),
            rec(2023, "senior", "Engineer", "remoto", 150_000.0),
            rec(2024, "executivo", "Director", "hibrido", 250_000.0),
        ])
    }

    #[test]
    fn full_selection_summary() {
        let ds = dataset();
        let s = DashboardSummary::compute(&ds, &FilterSelection::all(&ds), &SummaryOptions::default())
            .unwrap();
        assert_eq!(s.record_count, 4);
        assert_eq!(s.unique_titles, 3);
        assert_eq!(s.median_usd, Some(155_000.0));
        assert_eq!(s.year_span, Some((2023, 2024)));
        assert_eq!(
            s.yearly_median,
            vec![
                (FieldValue::Integer(2023), 100_000.0),
                (FieldValue::Integer(2024), 205_000.0),
            ]
        );
        assert_eq!(
            s.yearly_mean,
            vec![
                (FieldValue::Integer(2023), 100_000.0),
                (FieldValue::Integer(2024), 205_000.0),
            ]
        );
        assert_eq!(s.top_titles[0], (FieldValue::from("Director"), 250_000.0));
        assert_eq!(s.level_order, vec!["junior", "senior", "executivo"]);
        assert_eq!(s.level_boxes.len(), 3);
        assert_eq!(
            s.arrangement_medians
                .iter()
                .map(|(k, _)| k.to_string())
                .collect::<Vec<_>>(),
            vec!["hibrido", "presencial", "remoto"]
        );
    }

    #[test]
    fn empty_selection_uses_placeholders() {
        let ds = dataset();
        let s = DashboardSummary::compute(&ds, &FilterSelection::default(), &SummaryOptions::default())
            .unwrap();
        assert_eq!(s.record_count, 0);
        assert_eq!(s.total_count, 4);
        assert_eq!(s.mean_usd, None);
        assert_eq!(format_usd(s.median_usd), NOT_AVAILABLE);
        assert!(s.yearly_median.is_empty());
        assert!(s.yearly_mean.is_empty());
        assert!(s.preview.is_empty());
        assert_eq!(s.headline(), "No year selected.");
    }

    #[test]
    fn preview_is_capped() {
        let ds = dataset();
        let options = SummaryOptions {
            display_limit: 2,
            ..SummaryOptions::default()
        };
        let s = DashboardSummary::compute(&ds, &FilterSelection::all(&ds), &options).unwrap();
        assert_eq!(s.preview.len(), 2);
        assert_eq!(s.preview_caption(), "Showing 2 of 4 filtered records.");
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(Some(1_234_567.4)), "$1,234,567");
        assert_eq!(format_usd(Some(999.5)), "$1,000");
        assert_eq!(format_usd(Some(0.0)), "$0");
        assert_eq!(format_usd(None), "N/A");
        assert_eq!(format_count(12_500), "12,500");
    }
}
