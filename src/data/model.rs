use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// FieldValue – a single cell read as a grouping key
// ---------------------------------------------------------------------------

/// A typed cell value usable as a grouping key.
/// Used in `BTreeMap` / `BTreeSet` / `HashSet`, so it must be `Ord + Hash`.
/// Equality, ordering and hashing all compare floats by bit pattern.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord so floats can live in ordered sets --

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v:.2}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl FieldValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Field – the fixed 12-column layout
// ---------------------------------------------------------------------------

/// The columns of a salary record, in source file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    ExperienceLevel,
    ContractType,
    JobTitle,
    Salary,
    Currency,
    SalaryUsd,
    EmployeeResidence,
    WorkArrangement,
    CompanyLocation,
    CompanySize,
    CountryIso,
}

impl Field {
    /// All fields in positional order.
    pub const ALL: [Field; 12] = [
        Field::Year,
        Field::ExperienceLevel,
        Field::ContractType,
        Field::JobTitle,
        Field::Salary,
        Field::Currency,
        Field::SalaryUsd,
        Field::EmployeeResidence,
        Field::WorkArrangement,
        Field::CompanyLocation,
        Field::CompanySize,
        Field::CountryIso,
    ];

    /// Number of columns a well-formed input file carries.
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::ExperienceLevel => "experience_level",
            Field::ContractType => "contract_type",
            Field::JobTitle => "job_title",
            Field::Salary => "salary",
            Field::Currency => "currency",
            Field::SalaryUsd => "salary_usd",
            Field::EmployeeResidence => "employee_residence",
            Field::WorkArrangement => "work_arrangement",
            Field::CompanyLocation => "company_location",
            Field::CompanySize => "company_size",
            Field::CountryIso => "country_iso",
        }
    }

    /// Column name used by the salary survey files the dashboard was built for.
    pub fn source_name(self) -> &'static str {
        match self {
            Field::Year => "ano",
            Field::ExperienceLevel => "nivel_experiencia",
            Field::ContractType => "tipo_contrato",
            Field::JobTitle => "cargo",
            Field::Salary => "salario",
            Field::Currency => "moeda",
            Field::SalaryUsd => "salario_usd",
            Field::EmployeeResidence => "residencia_funcionario",
            Field::WorkArrangement => "regime_trabalho",
            Field::CompanyLocation => "local_empresa",
            Field::CompanySize => "tamanho_empresa",
            Field::CountryIso => "pais_iso",
        }
    }

    /// Whether mean/median make sense for this field.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Year | Field::Salary | Field::SalaryUsd)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names none of the 12 columns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.name() == needle || f.source_name() == needle)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the salary file
// ---------------------------------------------------------------------------

/// Read a numeric cell; blank cells and `NaN` are missing values.
fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.filter(|v| !v.is_nan()))
}

/// A single salary observation. Field order matches the file's column order,
/// which is what positional CSV deserialization relies on.
///
/// The salary columns are optional: a missing cell is skipped by every
/// statistic instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub experience_level: String,
    pub contract_type: String,
    pub job_title: String,
    #[serde(deserialize_with = "optional_number")]
    pub salary: Option<f64>,
    pub currency: String,
    #[serde(deserialize_with = "optional_number")]
    pub salary_usd: Option<f64>,
    pub employee_residence: String,
    pub work_arrangement: String,
    pub company_location: String,
    pub company_size: String,
    pub country_iso: String,
}

impl Record {
    /// Read a field as a grouping key; `None` for a missing salary.
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::Year => Some(FieldValue::Integer(i64::from(self.year))),
            Field::Salary | Field::SalaryUsd => self.numeric(field).map(FieldValue::Float),
            other => Some(FieldValue::Text(self.text(other).to_string())),
        }
    }

    /// Read a numeric field; `None` for categorical fields and missing values.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Year => Some(f64::from(self.year)),
            Field::Salary => self.salary,
            Field::SalaryUsd => self.salary_usd,
            _ => None,
        }
    }

    /// Display text of a field, as shown in the raw data table.
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::Year => self.year.to_string(),
            Field::Salary | Field::SalaryUsd => self
                .numeric(field)
                .map(|v| format!("{v:.0}"))
                .unwrap_or_default(),
            other => self.text(other).to_string(),
        }
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::ExperienceLevel => &self.experience_level,
            Field::ContractType => &self.contract_type,
            Field::JobTitle => &self.job_title,
            Field::Currency => &self.currency,
            Field::EmployeeResidence => &self.employee_residence,
            Field::WorkArrangement => &self.work_arrangement,
            Field::CompanyLocation => &self.company_location,
            Field::CompanySize => &self.company_size,
            Field::CountryIso => &self.country_iso,
            Field::Year | Field::Salary | Field::SalaryUsd => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – an immutable, versioned sequence of records
// ---------------------------------------------------------------------------

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// An ordered, read-only collection of records.
///
/// Every constructed dataset gets a fresh `version`, which the summary cache
/// uses as part of its key.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    version: u64,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset {
            records,
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn empty() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct years.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Distinct experience levels in order of first appearance.
    pub fn levels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.experience_level.as_str()))
            .map(|r| r.experience_level.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_both_naming_schemes() {
        assert_eq!("salary_usd".parse::<Field>(), Ok(Field::SalaryUsd));
        assert_eq!("salario_usd".parse::<Field>(), Ok(Field::SalaryUsd));
        assert_eq!("ano".parse::<Field>(), Ok(Field::Year));
        assert!("bonus".parse::<Field>().is_err());
    }

    #[test]
    fn field_value_orders_within_and_across_variants() {
        let mut vals = vec![
            FieldValue::Text("b".into()),
            FieldValue::Integer(2024),
            FieldValue::Text("a".into()),
            FieldValue::Integer(2023),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                FieldValue::Integer(2023),
                FieldValue::Integer(2024),
                FieldValue::Text("a".into()),
                FieldValue::Text("b".into()),
            ]
        );
    }

    #[test]
    fn float_keys_agree_on_equality_and_hash() {
        let nan = FieldValue::Float(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_ne!(FieldValue::Float(0.0), FieldValue::Float(-0.0));

        let keys: HashSet<FieldValue> = [1.0, 2.0, 2.0, f64::NAN, f64::NAN]
            .into_iter()
            .map(FieldValue::Float)
            .collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn missing_salary_cells_read_as_none() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(
                "2024,senior,CLT,Engineer,,USD,NaN,US,remoto,US,G,USA\n\
                 2024,senior,CLT,Engineer,,USD,90000,US,remoto,US,G,USA\n"
                    .as_bytes(),
            );
        let rows: Vec<Record> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows[0].salary, None);
        assert_eq!(rows[0].salary_usd, None);
        assert_eq!(rows[0].value(Field::SalaryUsd), None);
        assert_eq!(rows[0].display(Field::SalaryUsd), "");
        assert_eq!(rows[1].salary, None);
        assert_eq!(rows[1].salary_usd, Some(90_000.0));
    }

    #[test]
    fn datasets_get_distinct_versions() {
        let a = Dataset::empty();
        let b = Dataset::empty();
        assert_ne!(a.version(), b.version());
    }
}
