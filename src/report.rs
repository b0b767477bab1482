use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::loader::LoadedRecords;
use crate::models::LevelTable;
use crate::ranking::{self, Series};
use crate::stats::{self, LevelDistribution};

/// Everything a salary report shows, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct SalarySummary {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub coerced_salaries: usize,
    pub top_titles: Series,
    pub bottom_titles: Series,
    pub distribution: LevelDistribution,
    pub percentages: LevelTable<u32>,
    pub level_averages: LevelTable<Option<f64>>,
}

pub fn summarize(source: &str, loaded: &LoadedRecords, limit: usize) -> Result<SalarySummary> {
    let records = &loaded.records;
    let top_titles = ranking::title_averages(records, &ranking::top_n(records, limit))?;
    let bottom_titles = ranking::title_averages(records, &ranking::bottom_n(records, limit))?;
    let distribution = stats::experience_distribution(records)?;
    let level_averages = stats::average_by_experience(records)?;

    Ok(SalarySummary {
        source: source.to_string(),
        generated_at: Utc::now(),
        record_count: records.len(),
        coerced_salaries: loaded.coerced,
        top_titles,
        bottom_titles,
        percentages: distribution.percentages(),
        distribution,
        level_averages,
    })
}

fn write_titles(output: &mut String, series: &Series, highest_first: bool) {
    if series.is_empty() {
        let _ = writeln!(output, "No records to rank.");
        return;
    }

    let mut entries: Vec<(&str, f64)> = series.iter().collect();
    if highest_first {
        entries.reverse();
    }

    for (title, average) in entries {
        let _ = writeln!(output, "- {}: ${:.0} average", title, average);
    }
}

pub fn build_report(summary: &SalarySummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Salary Insights Report");
    let _ = writeln!(
        output,
        "Generated from {} on {}",
        summary.source,
        summary.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "{} records analysed.", summary.record_count);
    if summary.coerced_salaries > 0 {
        let _ = writeln!(
            output,
            "{} records had an unreadable salary_in_usd and were counted as $0, \
             which lowers every average they belong to.",
            summary.coerced_salaries
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Paying Titles");
    write_titles(&mut output, &summary.top_titles, true);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Lowest Paying Titles");
    write_titles(&mut output, &summary.bottom_titles, false);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Experience Mix");
    if summary.distribution.total == 0 {
        let _ = writeln!(output, "No records to break down.");
    } else {
        for (level, count) in summary.distribution.counts.iter() {
            let _ = writeln!(
                output,
                "- {}: {}% ({} records)",
                level,
                summary.percentages[level],
                count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Salary by Experience");
    for (level, average) in summary.level_averages.iter() {
        match average {
            Some(average) => {
                let _ = writeln!(output, "- {}: ${:.0}", level, average);
            }
            None => {
                let _ = writeln!(output, "- {}: n/a", level);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, Record};

    fn record(level: &str, title: &str, salary: f64) -> Record {
        Record::new(
            "2023", level, "FT", title, "0", "USD", salary, "US", "100", "US", "M",
        )
    }

    fn sample() -> LoadedRecords {
        LoadedRecords {
            records: vec![
                record("SE", "Data Scientist", 150000.0),
                record("MI", "Data Analyst", 60000.0),
                record("EN", "Data Analyst", 40000.0),
                record("EX", "Head of Data", 210000.0),
                record("SE", "ML Engineer", 0.0),
            ],
            coerced: 1,
        }
    }

    #[test]
    fn summary_collects_every_section() {
        let summary = summarize("ds_salaries.csv", &sample(), 2).unwrap();

        assert_eq!(summary.record_count, 5);
        assert_eq!(summary.coerced_salaries, 1);
        assert_eq!(summary.top_titles.labels(), ["Data Scientist", "Head of Data"]);
        assert_eq!(summary.bottom_titles.labels(), ["ML Engineer", "Data Analyst"]);
        assert_eq!(summary.bottom_titles.values(), [0.0, 50000.0]);
        assert_eq!(summary.percentages[ExperienceLevel::Senior], 40);
        assert_eq!(summary.level_averages[ExperienceLevel::Director], None);
    }

    #[test]
    fn report_lists_highest_first() {
        let summary = summarize("ds_salaries.csv", &sample(), 2).unwrap();
        let report = build_report(&summary);

        let head = report.find("- Head of Data: $210000 average").unwrap();
        let scientist = report.find("- Data Scientist: $150000 average").unwrap();
        assert!(head < scientist);
        assert!(report.contains("counted as $0"));
        assert!(report.contains("- SE: 40% (2 records)"));
        assert!(report.contains("- Director: n/a"));
    }

    #[test]
    fn report_handles_no_records() {
        let summary = summarize("empty.csv", &LoadedRecords::default(), 10).unwrap();
        let report = build_report(&summary);

        assert!(report.contains("0 records analysed."));
        assert!(report.contains("No records to rank."));
        assert!(report.contains("No records to break down."));
        assert!(!report.contains("counted as $0"));
    }

    #[test]
    fn summary_serializes_levels_by_code() {
        let summary = summarize("ds_salaries.csv", &sample(), 1).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["percentages"]["EX"], 20);
        assert_eq!(json["level_averages"]["Director"], serde_json::Value::Null);
        assert_eq!(json["top_titles"]["labels"][0], "Head of Data");
    }
}
