//! End-to-end tests: CSV file → Dataset → filter → statistics → summary.

use std::io::Write;

use salary_insights::cache::SummaryCache;
use salary_insights::data::filter::{filter, FilterSelection};
use salary_insights::data::loader::load_csv;
use salary_insights::data::model::{Dataset, Field, FieldValue};
use salary_insights::stats;
use salary_insights::summary::{DashboardSummary, SummaryOptions};
use salary_insights::DashboardError;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
ano,nivel_experiencia,tipo_contrato,cargo,salario,moeda,salario_usd,residencia_funcionario,regime_trabalho,local_empresa,tamanho_empresa,pais_iso
2023,junior,CLT,Data Analyst,250000,BRL,50000,BR,remoto,BR,M,BRA
2023,senior,CLT,Data Engineer,150000,USD,150000,US,presencial,US,G,USA
2024,senior,PJ,Data Engineer,160000,USD,160000,US,hibrido,US,G,USA
2024,pleno,CLT,Data Scientist,110000,USD,110000,CA,remoto,US,M,USA
2025,executivo,CLT,Head of Data,240000,USD,240000,US,presencial,US,G,USA
2025,junior,contrato,Data Analyst,60000,EUR,65000,DE,remoto,DE,P,DEU
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn sample() -> Dataset {
    let file = write_csv(SAMPLE);
    load_csv(file.path()).unwrap()
}

/// Every combination of the dataset's years and levels, including empty ones.
fn all_selections(ds: &Dataset) -> Vec<FilterSelection> {
    let years: Vec<i32> = ds.years().into_iter().collect();
    let levels = ds.levels();
    let mut out = Vec::new();
    for ymask in 0..(1u32 << years.len()) {
        for lmask in 0..(1u32 << levels.len()) {
            let ys = (0..years.len())
                .filter(|i| ymask & (1 << i) != 0)
                .map(|i| years[i]);
            let ls = (0..levels.len())
                .filter(|i| lmask & (1 << i) != 0)
                .map(|i| levels[i].clone());
            out.push(FilterSelection::new(ys, ls));
        }
    }
    out
}

#[test]
fn loads_twelve_column_file() {
    let ds = sample();
    assert_eq!(ds.len(), 6);
    assert_eq!(ds.years().into_iter().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
    assert_eq!(ds.levels(), vec!["junior", "senior", "pleno", "executivo"]);
}

#[test]
fn wrong_column_count_is_fatal() {
    let file = write_csv("ano,nivel,salario\n2023,junior,1\n");
    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(err, DashboardError::SchemaMismatch { expected: 12, found: 3, .. }));
}

#[test]
fn filter_output_is_subset_satisfying_selection() {
    let ds = sample();
    for sel in all_selections(&ds) {
        let out = filter(&ds, &sel);
        assert!(out.len() <= ds.len());
        for r in out.records() {
            assert!(sel.years.contains(&r.year));
            assert!(sel.levels.contains(&r.experience_level));
            assert!(ds.records().contains(r));
        }
    }
}

#[test]
fn empty_selection_gives_empty_dataset() {
    let ds = sample();
    assert!(filter(&ds, &FilterSelection::default()).is_empty());
    let no_levels = FilterSelection::new(ds.years(), Vec::<String>::new());
    assert!(filter(&ds, &no_levels).is_empty());
}

#[test]
fn full_selection_preserves_count_and_median() {
    let ds = sample();
    let all = filter(&ds, &FilterSelection::all(&ds));
    assert_eq!(stats::count(&all), stats::count(&ds));
    assert_eq!(
        stats::median(&all, Field::SalaryUsd).unwrap(),
        stats::median(&ds, Field::SalaryUsd).unwrap()
    );
}

#[test]
fn top_n_is_bounded_and_non_increasing() {
    let ds = sample();
    let by_title = stats::grouped_median(&ds, Field::JobTitle, Field::SalaryUsd).unwrap();
    for n in 0..6 {
        let top = stats::top_n(&by_title, n);
        assert_eq!(top.len(), n.min(by_title.len()));
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }
    assert_eq!(
        stats::top_n(&by_title, 1),
        vec![(FieldValue::from("Head of Data"), 240_000.0)]
    );
}

#[test]
fn level_order_follows_seniority() {
    let ds = sample();
    let canonical = ["junior", "pleno", "senior", "executivo"];
    let juniors_and_seniors = filter(&ds, &FilterSelection::new(ds.years(), ["senior", "junior"]));
    assert_eq!(
        stats::category_order(&juniors_and_seniors, Field::ExperienceLevel, &canonical),
        vec!["junior", "senior"]
    );
    assert_eq!(
        stats::category_order(&ds, Field::ExperienceLevel, &canonical),
        vec!["junior", "pleno", "senior", "executivo"]
    );
}

#[test]
fn summary_for_every_selection_never_fails() {
    let ds = sample();
    let options = SummaryOptions::default();
    let mut cache = SummaryCache::new(8);
    for sel in all_selections(&ds) {
        let summary = cache.get_or_compute(&ds, &sel, &options).unwrap();
        assert_eq!(summary.record_count, filter(&ds, &sel).len());
        assert_eq!(summary.mean_usd.is_none(), summary.record_count == 0);
        assert_eq!(summary.median_usd.is_none(), summary.record_count == 0);
        assert!(summary.preview.len() <= options.display_limit);
    }
}

#[test]
fn summary_serializes_for_headless_output() {
    let ds = sample();
    let sel = FilterSelection::new([2023], ["junior", "senior"]);
    let summary = DashboardSummary::compute(&ds, &sel, &SummaryOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["record_count"], 2);
    assert_eq!(json["median_usd"], 100_000.0);
    assert_eq!(json["yearly_median"][0][0], 2023);
    assert_eq!(json["level_order"], serde_json::json!(["junior", "senior"]));
    assert_eq!(json["preview"][0]["job_title"], "Data Analyst");
}

#[test]
fn missing_salaries_do_not_poison_the_summary() {
    let file = write_csv(
        "ano,nivel_experiencia,tipo_contrato,cargo,salario,moeda,salario_usd,residencia_funcionario,regime_trabalho,local_empresa,tamanho_empresa,pais_iso
2024,senior,CLT,Data Engineer,,USD,NaN,US,remoto,US,G,USA
2024,senior,CLT,Data Engineer,1,USD,1,US,remoto,US,G,USA
2024,junior,CLT,Data Analyst,2,USD,2,US,remoto,US,G,USA
2024,junior,CLT,Data Analyst,3,USD,,US,remoto,US,G,USA
2024,junior,CLT,Data Analyst,3,USD,3,US,remoto,US,G,USA
",
    );
    let ds = load_csv(file.path()).unwrap();
    let summary = DashboardSummary::compute(&ds, &FilterSelection::all(&ds), &SummaryOptions::default())
        .unwrap();
    assert_eq!(summary.record_count, 5);
    assert_eq!(summary.mean_usd, Some(2.0));
    assert_eq!(summary.median_usd, Some(2.0));
    assert_eq!(summary.yearly_mean, vec![(FieldValue::Integer(2024), 2.0)]);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["preview"][0]["salary_usd"].is_null());
}
