use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::model::{Dataset, Field, Record};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a CSV file.
///
/// The file must carry one header row and exactly [`Field::COUNT`] columns.
/// Header names are ignored: columns are mapped onto [`Record`] by position,
/// so files with translated or abbreviated headers load the same way.
pub fn load_csv(path: &Path) -> Result<Dataset, DashboardError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DashboardError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DashboardError::Io(e),
    })?;

    let dataset = read_csv(file)?;
    log::info!(
        "Loaded {} salary records from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV content from any reader. See [`load_csv`] for the layout.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset, DashboardError> {
    // `flexible` so that ragged rows reach our own column check and surface
    // as `SchemaMismatch` instead of a generic CSV error.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?;
    if headers.len() != Field::COUNT {
        return Err(DashboardError::SchemaMismatch {
            expected: Field::COUNT,
            found: headers.len(),
            line: None,
        });
    }
    log::debug!(
        "Remapping source columns {:?} onto {:?}",
        headers.iter().collect::<Vec<_>>(),
        Field::ALL.map(Field::name)
    );

    let mut records = Vec::new();
    for result in reader.records() {
        let raw = result?;
        let line = raw.position().map_or(0, |p| p.line());
        if raw.len() != Field::COUNT {
            return Err(DashboardError::SchemaMismatch {
                expected: Field::COUNT,
                found: raw.len(),
                line: Some(line),
            });
        }
        let record: Record = raw
            .deserialize(None)
            .map_err(|e| parse_error(line, e))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

/// Turn a per-row deserialize failure into `Parse` naming the offending column.
fn parse_error(line: u64, error: csv::Error) -> DashboardError {
    let detail = match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => Some((err.field(), err.kind().to_string())),
        _ => None,
    };
    match detail {
        Some((column, message)) => DashboardError::Parse {
            line,
            column: column.and_then(|i| Field::ALL.get(i as usize).copied()),
            message,
        },
        None => DashboardError::Csv(error),
    }
}
