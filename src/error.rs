use thiserror::Error;

/// Failures raised while loading or aggregating salary records.
///
/// Malformed `salary_in_usd` text never shows up here: the loader replaces it
/// with 0 and keeps going.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    StructuralRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("cannot average salaries for '{group}': no matching records")]
    DivisionUndefined { group: String },
    #[error("unrecognized experience level '{0}'")]
    UnrecognizedCategory(String),
    #[error("series has {labels} labels but {values} values")]
    SeriesLengthMismatch { labels: usize, values: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = core::result::Result<T, AnalysisError>;
