//! Random-forest fit and evaluation.

use std::fmt;

use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::{mean_squared_error, r2};

use crate::error::{ModelError, ModelResult};

/// Trees in the ensemble.
const TREE_COUNT: u16 = 100;

/// Seed for bootstrap sampling, so fits are reproducible.
const FOREST_SEED: u64 = 42;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Error and goodness-of-fit metrics on the test partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub mse: f64,
    pub r2: f64,
}

/// A fitted popularity regressor.
pub struct PopularityModel {
    forest: Forest,
}

impl fmt::Debug for PopularityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopularityModel")
            .field("trees", &TREE_COUNT)
            .finish_non_exhaustive()
    }
}

fn to_matrix(rows: &[Vec<f64>]) -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&rows.to_vec())
}

impl PopularityModel {
    /// Fit a [`TREE_COUNT`]-tree forest on the train partition.
    pub fn fit(x_train: &[Vec<f64>], y_train: &[f64]) -> ModelResult<Self> {
        log::info!(
            "training {TREE_COUNT}-tree forest on {} rows",
            x_train.len()
        );

        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(TREE_COUNT.into())
            .with_seed(FOREST_SEED);

        let forest = RandomForestRegressor::fit(
            &to_matrix(x_train),
            &y_train.to_vec(),
            parameters,
        )
        .map_err(|e| ModelError::Train(e.to_string()))?;

        Ok(Self { forest })
    }

    /// Predict popularity for each row of `x`.
    pub fn predict(&self, x: &[Vec<f64>]) -> ModelResult<Vec<f64>> {
        self.forest
            .predict(&to_matrix(x))
            .map_err(|e| ModelError::Train(e.to_string()))
    }

    /// Mean squared error and coefficient of determination on the test
    /// partition.
    pub fn evaluate(&self, x_test: &[Vec<f64>], y_test: &[f64]) -> ModelResult<Evaluation> {
        let predictions = self.predict(x_test)?;
        let y_test = y_test.to_vec();

        let evaluation = Evaluation {
            mse: mean_squared_error(&y_test, &predictions),
            r2: r2(&y_test, &predictions),
        };
        log::info!("evaluation: mse={:.2} r2={:.2}", evaluation.mse, evaluation.r2);
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic synthetic data with a strong linear signal on the
    /// first feature and noise-free targets.
    fn synthetic(count: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut x = Vec::with_capacity(count);
        let mut y = Vec::with_capacity(count);
        for i in 0..count {
            let lead = (i % 10) as f64;
            let row = vec![
                lead,
                (i % 3) as f64,
                (i % 7) as f64,
                2000.0 + (i % 20) as f64,
                (i % 12) as f64,
                (i % 5) as f64,
                (i % 2) as f64,
                (i % 50) as f64,
                (i % 11) as f64,
            ];
            x.push(row);
            y.push(lead * 10.0);
        }
        (x, y)
    }

    #[test]
    fn test_fit_and_evaluate_on_learnable_data() {
        let (x, y) = synthetic(80);
        let model = PopularityModel::fit(&x, &y).unwrap();
        let evaluation = model.evaluate(&x, &y).unwrap();

        // The signal is trivially learnable, so the fit should be tight.
        assert!(evaluation.mse < 100.0);
        assert!(evaluation.r2 > 0.8);
    }

    #[test]
    fn test_fit_is_deterministic_for_a_fixed_seed() {
        let (x, y) = synthetic(60);

        let first = PopularityModel::fit(&x, &y).unwrap().predict(&x).unwrap();
        let second = PopularityModel::fit(&x, &y).unwrap().predict(&x).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prediction_length_matches_input() {
        let (x, y) = synthetic(60);
        let model = PopularityModel::fit(&x, &y).unwrap();

        let predictions = model.predict(&x[..7]).unwrap();
        assert_eq!(predictions.len(), 7);
    }
}
