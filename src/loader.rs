use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, Result};
use crate::models::{Record, FIELD_COUNT};

/// Column holding `salary_in_usd`.
const SALARY_IN_USD_COLUMN: usize = 6;

/// Reads raw `salary_in_usd` text as a non-negative amount.
///
/// Returns `None` for text that does not parse or that parses to a negative
/// or non-finite number. [`parse_rows`] stores 0 for those rows, so they sink
/// to the bottom of top rankings and pull down every average they take
/// part in.
pub fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        // -0 is stored as 0
        .map(|value| value + 0.0)
}

/// Result of turning raw rows into records.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    /// Rows whose salary was replaced with 0.
    pub coerced: usize,
}

/// Converts rows into records, discarding the first row as a header.
///
/// Every data row must have exactly [`FIELD_COUNT`] fields. An empty input
/// yields no records.
pub fn parse_rows<I>(rows: I) -> Result<LoadedRecords>
where
    I: IntoIterator<Item = StringRecord>,
{
    let mut rows = rows.into_iter();
    if rows.next().is_none() {
        warn!("input has no header row; treating it as empty");
        return Ok(LoadedRecords::default());
    }

    let mut loaded = LoadedRecords::default();
    for (index, row) in rows.enumerate() {
        // header is line 1
        let line = index + 2;
        if row.len() != FIELD_COUNT {
            return Err(AnalysisError::StructuralRow {
                line,
                expected: FIELD_COUNT,
                found: row.len(),
            });
        }

        let raw_salary = &row[SALARY_IN_USD_COLUMN];
        let salary_in_usd = match parse_salary(raw_salary) {
            Some(value) => value,
            None => {
                debug!(line, raw = raw_salary, "salary_in_usd is not a valid amount, using 0");
                loaded.coerced += 1;
                0.0
            }
        };

        loaded.records.push(Record::new(
            &row[0],
            &row[1],
            &row[2],
            &row[3],
            &row[4],
            &row[5],
            salary_in_usd,
            &row[7],
            &row[8],
            &row[9],
            &row[10],
        ));
    }

    if loaded.coerced > 0 {
        warn!(
            coerced = loaded.coerced,
            "some salary_in_usd values were malformed and counted as 0"
        );
    }

    Ok(loaded)
}

/// Reads a comma-delimited UTF-8 file and parses its rows.
///
/// Blank lines are dropped by the reader and never count as rows.
pub fn load_records(path: &Path) -> Result<LoadedRecords> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let rows = reader.records().collect::<core::result::Result<Vec<_>, _>>()?;
    let loaded = parse_rows(rows)?;
    info!(
        path = %path.display(),
        records = loaded.records.len(),
        "loaded salary records"
    );
    Ok(loaded)
}
