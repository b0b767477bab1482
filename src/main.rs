use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod loader;
mod models;
mod plot;
mod ranking;
mod report;
mod stats;

use loader::LoadedRecords;
use plot::ChartLabels;
use ranking::Series;

const DEFAULT_INPUT: &str = "ds_salaries.csv";

#[derive(Parser)]
#[command(name = "salary-insights")]
#[command(about = "Salary rankings and experience breakdowns for job salary datasets", long_about = None)]
struct Cli {
    /// Comma-delimited salary file; the first row is always treated as a header
    #[arg(long, global = true, default_value = DEFAULT_INPUT)]
    csv: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart average salaries of the titles behind the best-paid records
    TopJobs {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "top_jobs.png")]
        out: PathBuf,
    },
    /// Chart average salaries of the titles behind the worst-paid records
    BottomJobs {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "bottom_jobs.png")]
        out: PathBuf,
    },
    /// Show the experience-level mix and chart average salary per level
    Experience {
        #[arg(long, default_value = "experience_levels.png")]
        out: PathBuf,
    },
    /// Generate a markdown report, or print a JSON summary
    Report {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value = "salary_report.md")]
        out: PathBuf,
        /// Print the summary as JSON instead of writing the markdown report
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> anyhow::Result<LoadedRecords> {
    loader::load_records(path).with_context(|| format!("failed to load {}", path.display()))
}

fn chart_titles(
    loaded: &LoadedRecords,
    limit: usize,
    heading: &str,
    highest: bool,
    out: &Path,
) -> anyhow::Result<()> {
    let records = &loaded.records;
    let ranked = if highest {
        ranking::top_n(records, limit)
    } else {
        ranking::bottom_n(records, limit)
    };
    let series = ranking::title_averages(records, &ranked)?;

    if series.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("{heading}:");
    for (title, average) in series.iter().rev() {
        println!("- {title}: ${average:.0} average");
    }

    let title = format!("{heading} by Salary");
    plot::render_bar_chart(
        &series,
        ChartLabels {
            title: &title,
            value_axis: "Average Salary (USD)",
            label_axis: "Job Title",
        },
        out,
    )
    .context("failed to render chart")?;
    println!("Chart written to {}.", out.display());
    Ok(())
}

fn experience(loaded: &LoadedRecords, out: &Path) -> anyhow::Result<()> {
    let records = &loaded.records;
    let distribution = stats::experience_distribution(records)?;
    let averages = stats::average_by_experience(records)?;
    let percentages = distribution.percentages();

    println!("Experience levels across {} records:", distribution.total);
    let mut series = Series::default();
    for (level, average) in averages.iter() {
        let average_text = match average {
            Some(average) => {
                series.push(level.code(), *average);
                format!("${average:.0}")
            }
            None => "n/a".to_string(),
        };
        println!(
            "- {}: {}% ({} records), average {}",
            level, percentages[level], distribution.counts[level], average_text
        );
    }

    if series.is_empty() {
        return Ok(());
    }

    plot::render_bar_chart(
        &series,
        ChartLabels {
            title: "Average Salary by Experience Level",
            value_axis: "Average Salary (USD)",
            label_axis: "Experience Level",
        },
        out,
    )
    .context("failed to render chart")?;
    println!("Chart written to {}.", out.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let loaded = load(&cli.csv)?;

    match cli.command {
        Commands::TopJobs { limit, out } => {
            let heading = format!("Top {limit} Data Science Jobs");
            chart_titles(&loaded, limit, &heading, true, &out)?;
        }
        Commands::BottomJobs { limit, out } => {
            let heading = format!("Bottom {limit} Data Science Jobs");
            chart_titles(&loaded, limit, &heading, false, &out)?;
        }
        Commands::Experience { out } => {
            experience(&loaded, &out)?;
        }
        Commands::Report { limit, out, json } => {
            let source = cli.csv.display().to_string();
            let summary = report::summarize(&source, &loaded, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                std::fs::write(&out, report::build_report(&summary))
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Report written to {}.", out.display());
            }
        }
    }

    Ok(())
}
