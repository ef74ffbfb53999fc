//! Chart rasterization for the PDF report.
//!
//! Renders the two per-year charts (sex distribution bars, income box plot)
//! to PNG with plotters' bitmap backend.  The rasters carry no text (page
//! titles are typeset by the PDF layer), so the export stays free of any
//! font-loading machinery.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;

use crate::data::summary::{CategoryCount, GroupedValues};

/// Raster size in pixels; the PDF scales it to the page width.
pub const RASTER_SIZE: (u32, u32) = (600, 400);

const BURGUNDY: RGBColor = RGBColor(0x80, 0x00, 0x20);
const GOLD: RGBColor = RGBColor(0xFF, 0xD7, 0x00);

fn series_color(index: usize) -> RGBColor {
    if index % 2 == 0 {
        BURGUNDY
    } else {
        GOLD
    }
}

/// Bar chart of row counts per sex category.
pub fn sex_distribution_png(counts: &[CategoryCount], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, RASTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("filling raster: {e}"))?;

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    let x_max = counts.len().max(1) as f64;
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| anyhow!("building chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(|e| anyhow!("drawing mesh: {e}"))?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, c)| {
            Rectangle::new(
                [(i as f64 + 0.2, 0.0), (i as f64 + 0.8, c.count as f64)],
                series_color(i).filled(),
            )
        }))
        .map_err(|e| anyhow!("drawing bars: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("writing {}: {e}", path.display()))
}

/// Box plot of normalized incomes per sex category.
pub fn income_box_png(groups: &[GroupedValues], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, RASTER_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("filling raster: {e}"))?;

    let all: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let (y_min, y_max) = if all.is_empty() {
        (0.0, 1.0)
    } else {
        let lo = all.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            (0.0, hi.max(1.0))
        } else {
            let pad = (hi - lo) * 0.1;
            ((lo - pad).max(0.0), hi + pad)
        }
    };
    let x_max = groups.len().max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0.0..x_max, (y_min as f32)..(y_max as f32))
        .map_err(|e| anyhow!("building chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(|e| anyhow!("drawing mesh: {e}"))?;

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            Boxplot::new_vertical(i as f64 + 0.5, &Quartiles::new(&g.values))
                .width(40)
                .style(series_color(i))
        }))
        .map_err(|e| anyhow!("drawing boxes: {e}"))?;

    root.present()
        .map_err(|e| anyhow!("writing {}: {e}", path.display()))
}
