//! Chart artifact generation.
//!
//! Consumes a [`ValidationResults`] and renders PNG artifacts: a bar chart
//! of null counts for columns that have any, and a valid-vs-duplicate pie
//! for the first id-like uniqueness column. Charts carry geometry only;
//! numeric labels and legends are rendered by the report layer next to the
//! embedded image.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use valida_model::ValidationResults;

const NULL_CHART_FILE: &str = "grafico_nulos.png";
const DUPLICATE_CHART_FILE: &str = "grafico_duplicados.png";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([64, 64, 64, 255]);
const BAR_BLUE: Rgba<u8> = Rgba([50, 116, 161, 255]);
const PIE_VALID: Rgba<u8> = Rgba([144, 238, 144, 255]);
const PIE_DUPLICATE: Rgba<u8> = Rgba([250, 128, 114, 255]);

const BAR_CHART_WIDTH: u32 = 800;
const BAR_CHART_HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
const PIE_SIZE: u32 = 400;

/// Render chart artifacts under `output_dir` and return their paths.
///
/// The list is empty when no column has nulls and no id-like uniqueness
/// count exists.
pub fn generate_charts(results: &ValidationResults, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create chart directory {}", output_dir.display()))?;
    let mut paths = Vec::new();

    let nulls = results.columns_with_nulls();
    if !nulls.is_empty() {
        let counts: Vec<u64> = nulls.iter().map(|(_, count)| *count).collect();
        let path = output_dir.join(NULL_CHART_FILE);
        render_bar_chart(&counts)
            .save(&path)
            .with_context(|| format!("write null chart {}", path.display()))?;
        debug!(columns = counts.len(), path = %path.display(), "null chart written");
        paths.push(path);
    }

    if let Some((column, duplicates)) = find_id_like(&results.duplicates)
        && results.total_records > 0
    {
        let valid = results.total_records.saturating_sub(duplicates);
        let path = output_dir.join(DUPLICATE_CHART_FILE);
        render_pie_chart(valid, duplicates)
            .save(&path)
            .with_context(|| format!("write duplicate chart {}", path.display()))?;
        debug!(column, valid, duplicates, path = %path.display(), "duplicate chart written");
        paths.push(path);
    }

    Ok(paths)
}

/// An id-like column qualifies for the pie chart: named `id`
/// (case-insensitively) or ending in `_id`.
pub fn is_id_like(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "id" || lower.ends_with("_id")
}

fn find_id_like(duplicates: &BTreeMap<String, u64>) -> Option<(&str, u64)> {
    duplicates
        .iter()
        .find(|(column, _)| is_id_like(column))
        .map(|(column, &count)| (column.as_str(), count))
}

/// One bar per count, scaled to the tallest, over a left/bottom axis.
fn render_bar_chart(counts: &[u64]) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(BAR_CHART_WIDTH, BAR_CHART_HEIGHT, BACKGROUND);
    let plot_width = BAR_CHART_WIDTH - 2 * MARGIN;
    let plot_height = BAR_CHART_HEIGHT - 2 * MARGIN;

    // Axes.
    draw_filled_rect_mut(
        &mut img,
        Rect::at((MARGIN - 2) as i32, MARGIN as i32).of_size(2, plot_height + 2),
        AXIS,
    );
    draw_filled_rect_mut(
        &mut img,
        Rect::at(MARGIN as i32, (MARGIN + plot_height) as i32).of_size(plot_width, 2),
        AXIS,
    );

    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return img;
    }
    let slot = plot_width / counts.len() as u32;
    let bar_width = (slot * 7 / 10).max(1);
    for (index, &count) in counts.iter().enumerate() {
        let bar_height = ((count as f64 / max as f64) * plot_height as f64).round() as u32;
        if bar_height == 0 {
            continue;
        }
        let x = MARGIN + index as u32 * slot + (slot - bar_width) / 2;
        let y = MARGIN + plot_height - bar_height;
        draw_filled_rect_mut(
            &mut img,
            Rect::at(x as i32, y as i32).of_size(bar_width, bar_height),
            BAR_BLUE,
        );
    }
    img
}

/// Two-slice pie: valid records in green from twelve o'clock clockwise,
/// duplicates in salmon.
fn render_pie_chart(valid: u64, duplicates: u64) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(PIE_SIZE, PIE_SIZE, BACKGROUND);
    let total = valid + duplicates;
    if total == 0 {
        return img;
    }
    let valid_sweep = (valid as f64 / total as f64) * std::f64::consts::TAU;
    let center = (PIE_SIZE / 2) as f64;
    let radius = center - 20.0;

    for y in 0..PIE_SIZE {
        for x in 0..PIE_SIZE {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            // Angle from twelve o'clock, clockwise, in [0, TAU).
            let mut angle = dx.atan2(-dy);
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            let color = if angle <= valid_sweep { PIE_VALID } else { PIE_DUPLICATE };
            img.put_pixel(x, y, color);
        }
    }
    img
}
