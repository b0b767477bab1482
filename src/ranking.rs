use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{Record, SortDirection};
use crate::stats;

/// Salary used for ordering. Anything that is not a real number ranks as 0.
fn ranking_key(record: &Record) -> f64 {
    if record.salary_in_usd.is_nan() {
        0.0
    } else {
        record.salary_in_usd
    }
}

fn compare(a: f64, b: f64, direction: SortDirection) -> Ordering {
    // -0.0 and 0.0 must tie
    let (a, b) = (a + 0.0, b + 0.0);
    match direction {
        SortDirection::Ascending => a.total_cmp(&b),
        SortDirection::Descending => b.total_cmp(&a),
    }
}

/// Picks `n` records ordered by `salary_in_usd` in `direction`.
///
/// Ties keep their input order. Asking for more records than exist returns
/// every record, sorted.
pub fn rank(records: &[Record], n: usize, direction: SortDirection) -> Vec<Record> {
    let mut ranked: Vec<&Record> = records.iter().collect();
    ranked.sort_by(|a, b| compare(ranking_key(a), ranking_key(b), direction));
    ranked.into_iter().take(n).cloned().collect()
}

/// The `n` best-paid records.
pub fn top_n(records: &[Record], n: usize) -> Vec<Record> {
    rank(records, n, SortDirection::Descending)
}

/// The `n` worst-paid records.
pub fn bottom_n(records: &[Record], n: usize) -> Vec<Record> {
    rank(records, n, SortDirection::Ascending)
}

/// Labels paired index by index with chart values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(AnalysisError::SeriesLengthMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Reorders labels and values together so values follow `direction`.
    ///
    /// Equal values keep their relative order.
    pub fn sort(&mut self, direction: SortDirection) {
        let mut pairs: Vec<(String, f64)> = self
            .labels
            .drain(..)
            .zip(self.values.drain(..))
            .collect();
        pairs.sort_by(|a, b| compare(a.1, b.1, direction));
        let (labels, values): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
        self.labels = labels;
        self.values = values;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Builds the (job title, average salary) series for a ranked subset.
///
/// Each ranked record contributes one entry: its title averaged over the
/// full `records` set. A title appearing twice in `ranked` appears twice in
/// the series. The result is sorted ascending, matching how a horizontal
/// chart stacks bars from the bottom.
pub fn title_averages(records: &[Record], ranked: &[Record]) -> Result<Series> {
    let labels: Vec<String> = ranked.iter().map(|r| r.job_title.clone()).collect();
    let values = labels
        .iter()
        .map(|title| stats::group_average(records, title))
        .collect::<Result<Vec<f64>>>()?;

    let mut series = Series::new(labels, values)?;
    series.sort(SortDirection::Ascending);
    Ok(series)
}
