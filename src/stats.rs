use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{LevelTable, Record};

/// Mean `salary_in_usd` of the records whose `job_title` equals `job_title`.
pub fn group_average(records: &[Record], job_title: &str) -> Result<f64> {
    let (total, count) = records
        .iter()
        .filter(|record| record.job_title == job_title)
        .fold((0.0, 0usize), |(total, count), record| {
            (total + record.salary_in_usd, count + 1)
        });

    if count == 0 {
        return Err(AnalysisError::DivisionUndefined {
            group: job_title.to_string(),
        });
    }

    Ok(total / count as f64)
}

/// How records split across the experience levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelDistribution {
    pub counts: LevelTable<usize>,
    pub total: usize,
}

impl LevelDistribution {
    /// Share of each level rounded to whole percentage points.
    ///
    /// Rounding happens per level, so the shares do not always add up to 100.
    pub fn percentages(&self) -> LevelTable<u32> {
        self.counts.map(|_, count| {
            if self.total == 0 {
                0
            } else {
                (*count as f64 / self.total as f64 * 100.0).round() as u32
            }
        })
    }
}

/// Counts records per experience level.
///
/// Any record with a code outside the five known levels fails the whole
/// computation.
pub fn experience_distribution(records: &[Record]) -> Result<LevelDistribution> {
    let mut counts: LevelTable<usize> = LevelTable::default();
    for record in records {
        counts[record.level()?] += 1;
    }

    Ok(LevelDistribution {
        counts,
        total: records.len(),
    })
}

/// Mean `salary_in_usd` per experience level.
///
/// Levels without any record are `None`, never 0.
pub fn average_by_experience(records: &[Record]) -> Result<LevelTable<Option<f64>>> {
    let mut sums: LevelTable<(f64, usize)> = LevelTable::default();
    for record in records {
        let slot = &mut sums[record.level()?];
        slot.0 += record.salary_in_usd;
        slot.1 += 1;
    }

    Ok(sums.map(|_, (total, count)| {
        if *count == 0 {
            None
        } else {
            Some(total / *count as f64)
        }
    }))
}
