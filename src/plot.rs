//! Horizontal bar charts for salary series
//!
//! Charts are drawn with [`plotters`] onto a 1200x800 bitmap and saved as PNG.
//! The salary axis always spans 0 to 220000 USD so that charts from different
//! runs compare at a glance.

use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::ranking::Series;

/// Upper bound of the salary axis, in USD.
pub const AXIS_MAX: f64 = 220_000.0;

/// Distance between salary axis ticks, in USD.
pub const AXIS_STEP: f64 = 20_000.0;

const CHART_SIZE: (u32, u32) = (1200, 800);

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Text placed around a chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub value_axis: &'a str,
    pub label_axis: &'a str,
}

/// Tick positions along the salary axis.
pub fn axis_ticks() -> Vec<f64> {
    let steps = (AXIS_MAX / AXIS_STEP).round() as usize;
    (0..=steps).map(|step| step as f64 * AXIS_STEP).collect()
}

/// Width of the category label area, sized for the longest label.
fn label_area_width(series: &Series) -> u32 {
    let longest = series
        .labels()
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (longest * 11 + 40).clamp(120, 480)
}

/// Bar lengths for `series`, with anything past [`AXIS_MAX`] cut to the edge.
fn bar_lengths(series: &Series) -> Vec<f64> {
    series
        .values()
        .iter()
        .map(|value| value.min(AXIS_MAX))
        .collect()
}

/// Draws `series` as horizontal bars and writes the PNG to `output_path`.
///
/// The first entry of the series is drawn at the bottom of the chart. Values
/// beyond [`AXIS_MAX`] are cut off at the edge of the chart.
pub fn render_bar_chart(series: &Series, labels: ChartLabels<'_>, output_path: &Path) -> Result<()> {
    if series.is_empty() {
        return Err(PlotError::InvalidData("Series cannot be empty".to_string()));
    }

    if let Some(value) = series.values().iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(PlotError::InvalidData(format!(
            "Value {value} cannot be drawn as a bar"
        )));
    }

    let clipped = series.values().iter().filter(|v| **v > AXIS_MAX).count();
    if clipped > 0 {
        warn!(clipped, axis_max = AXIS_MAX, "values exceed the salary axis and are cut off");
    }

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let names = series.labels();
    let bars = bar_lengths(series);
    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(label_area_width(series))
        .build_cartesian_2d(0.0..AXIS_MAX, (0..series.len()).into_segmented())
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_labels(axis_ticks().len())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_labels(series.len())
        .y_label_formatter(&|y: &SegmentValue<usize>| match y {
            SegmentValue::CenterOf(index) => names.get(*index).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(labels.value_axis)
        .y_desc(labels.label_axis)
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::horizontal(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(8)
                .data(bars.iter().copied().enumerate()),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    info!(path = %output_path.display(), bars = series.len(), "chart written");
    Ok(())
}
