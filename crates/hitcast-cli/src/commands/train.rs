use std::path::Path;

use anyhow::Result;

use hitcast_model::{features, importance, PopularityModel};

/// Input of the training pipeline, produced by an external
/// feature-engineering step.
const MODEL_READY_PATH: &str = "model_ready_data.csv";

/// Chart output, overwritten on every run.
const IMPORTANCE_CHART_PATH: &str = "feature_importance.png";

pub fn run_train() -> Result<()> {
    let rows = features::load_rows(Path::new(MODEL_READY_PATH))?;
    log::info!("loaded {} rows from {MODEL_READY_PATH}", rows.len());

    let split = features::prepare(&rows, features::TEST_FRACTION, features::SPLIT_SEED)?;
    println!("Training set size: {} tracks", split.x_train.len());
    println!("Testing set size: {} tracks", split.x_test.len());

    let model = PopularityModel::fit(&split.x_train, &split.y_train)?;
    let evaluation = model.evaluate(&split.x_test, &split.y_test)?;
    println!("MSE: {:.2}", evaluation.mse);
    println!("R²: {:.2}", evaluation.r2);

    let scores = importance::permutation_importance(
        &model,
        &split.x_test,
        &split.y_test,
        importance::IMPORTANCE_SEED,
    )?;
    importance::render_importance_chart(&scores, Path::new(IMPORTANCE_CHART_PATH))?;
    println!("Saved feature importance chart to {IMPORTANCE_CHART_PATH}");

    Ok(())
}
