//! Feature table loading, imputation, and the train/test split.
//!
//! The input table is produced by an external feature-engineering step;
//! this module only checks its shape. Rows deserialize into a typed
//! [`FeatureRow`] so a missing column fails fast instead of silently
//! training on garbage.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::{ModelError, ModelResult};

/// Feature columns, in the order they are fed to the regressor.
pub const FEATURE_NAMES: [&str; 9] = [
    "is_collaboration",
    "num_artists",
    "track_name_length",
    "release_year",
    "release_month",
    "release_day_of_week",
    "is_explicit",
    "artist_popularity",
    "artist_followers",
];

/// Fraction of rows held out for evaluation.
pub const TEST_FRACTION: f64 = 0.2;

/// Seed for the split shuffle, so runs are reproducible.
pub const SPLIT_SEED: u64 = 42;

/// One row of the model-ready table.
///
/// The five `Option` columns can be empty in the input (artist lookups
/// that failed, unparseable release dates); they are imputed to 0 before
/// modeling. That is a deliberate, lossy policy, not a statistical one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureRow {
    pub is_collaboration: f64,
    pub num_artists: f64,
    pub track_name_length: f64,
    pub release_year: Option<f64>,
    pub release_month: Option<f64>,
    pub release_day_of_week: Option<f64>,
    pub is_explicit: f64,
    pub artist_popularity: Option<f64>,
    pub artist_followers: Option<f64>,
    /// Target column.
    pub popularity: f64,
}

impl FeatureRow {
    /// The feature vector in [`FEATURE_NAMES`] order, with missing values
    /// imputed to 0.
    #[must_use]
    pub fn features(&self) -> [f64; 9] {
        [
            self.is_collaboration,
            self.num_artists,
            self.track_name_length,
            self.release_year.unwrap_or(0.0),
            self.release_month.unwrap_or(0.0),
            self.release_day_of_week.unwrap_or(0.0),
            self.is_explicit,
            self.artist_popularity.unwrap_or(0.0),
            self.artist_followers.unwrap_or(0.0),
        ]
    }
}

/// Load the model-ready table from `path`.
///
/// Fails on I/O errors and on any row that does not carry every named
/// column (extra columns are ignored).
pub fn load_rows(path: &Path) -> ModelResult<Vec<FeatureRow>> {
    let file = File::open(path)?;
    read_rows(file)
}

/// Deserialize feature rows from any CSV reader.
pub fn read_rows<R: Read>(reader: R) -> ModelResult<Vec<FeatureRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Feature matrix and target vector, partitioned for training.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitData {
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Impute, project, and split `rows` into train/test partitions.
///
/// The shuffle is driven by `seed`, so the same table and seed always
/// produce the same partitions. The test partition gets
/// `round(len * test_fraction)` rows.
pub fn prepare(rows: &[FeatureRow], test_fraction: f64, seed: u64) -> ModelResult<SplitData> {
    if rows.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = (rows.len() as f64 * test_fraction).round() as usize;
    let (test_indices, train_indices) = indices.split_at(test_size);

    let project = |chosen: &[usize]| -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut x = Vec::with_capacity(chosen.len());
        let mut y = Vec::with_capacity(chosen.len());
        for &i in chosen {
            x.push(rows[i].features().to_vec());
            y.push(rows[i].popularity);
        }
        (x, y)
    };

    let (x_test, y_test) = project(test_indices);
    let (x_train, y_train) = project(train_indices);

    Ok(SplitData {
        x_train,
        x_test,
        y_train,
        y_test,
    })
}
