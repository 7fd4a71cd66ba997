//! Feature-importance ranking and chart rendering.
//!
//! Importance is measured by permutation: shuffle one feature column of
//! the test partition, re-predict, and score the feature by how much the
//! MSE degrades. Scores are clamped at zero, normalised to sum to 1, and
//! ranked descending.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ModelError, ModelResult};
use crate::features::FEATURE_NAMES;
use crate::train::PopularityModel;

/// Seed for the permutation shuffles.
pub const IMPORTANCE_SEED: u64 = 42;

/// One ranked feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Rank every feature by permutation importance on the test partition.
///
/// The returned scores sum to 1 and are sorted descending. When no
/// permutation degrades the fit at all (tiny or degenerate test sets),
/// every feature gets an equal share rather than dividing by zero.
pub fn permutation_importance(
    model: &PopularityModel,
    x_test: &[Vec<f64>],
    y_test: &[f64],
    seed: u64,
) -> ModelResult<Vec<FeatureImportance>> {
    if x_test.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let baseline = mse(y_test, &model.predict(x_test)?);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut raw = Vec::with_capacity(FEATURE_NAMES.len());
    for feature_index in 0..FEATURE_NAMES.len() {
        let mut column: Vec<f64> = x_test.iter().map(|row| row[feature_index]).collect();
        column.shuffle(&mut rng);

        let permuted: Vec<Vec<f64>> = x_test
            .iter()
            .zip(&column)
            .map(|(row, &value)| {
                let mut row = row.clone();
                row[feature_index] = value;
                row
            })
            .collect();

        let degraded = mse(y_test, &model.predict(&permuted)?);
        raw.push((degraded - baseline).max(0.0));
    }

    let total: f64 = raw.iter().sum();
    let mut scores: Vec<FeatureImportance> = FEATURE_NAMES
        .iter()
        .zip(&raw)
        .map(|(name, &score)| FeatureImportance {
            feature: (*name).to_string(),
            importance: if total > 0.0 {
                score / total
            } else {
                1.0 / FEATURE_NAMES.len() as f64
            },
        })
        .collect();

    scores.sort_by(|a, b| {
        b.importance
            .partial_cmp(&a.importance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(scores)
}

fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().max(1) as f64;
    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>()
        / n
}

/// Render `scores` as a horizontal bar chart at `path`, overwriting any
/// existing file. Bars are drawn top-down in rank order.
pub fn render_importance_chart(scores: &[FeatureImportance], path: &Path) -> ModelResult<()> {
    draw_chart(scores, path).map_err(|e| ModelError::Plot(e.to_string()))?;
    log::info!("saved feature importance chart to {}", path.display());
    Ok(())
}

fn draw_chart(
    scores: &[FeatureImportance],
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let count = scores.len();
    let max_importance = scores
        .iter()
        .map(|s| s.importance)
        .fold(f64::MIN_POSITIVE, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Which Features Matter Most?", ("sans-serif", 32))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(190)
        .build_cartesian_2d(0.0..max_importance * 1.1, 0.0..count as f64)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Importance Score")
        .y_labels(count)
        .y_label_formatter(&|y| feature_label(scores, *y))
        .draw()?;

    chart.draw_series(scores.iter().enumerate().map(|(rank, score)| {
        // Rank 0 goes at the top of the chart.
        let slot = (count - 1 - rank) as f64;
        Rectangle::new(
            [(0.0, slot + 0.15), (score.importance, slot + 0.85)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Map a y coordinate back to the feature occupying that slot, labelling
/// only ticks that fall near a slot centre.
fn feature_label(scores: &[FeatureImportance], y: f64) -> String {
    let count = scores.len();
    let slot = (y - 0.5).round();
    if slot < 0.0 {
        return String::new();
    }
    let slot = slot as usize;
    if slot >= count {
        return String::new();
    }
    scores[count - 1 - slot].feature.clone()
}
