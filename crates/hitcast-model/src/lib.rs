//! Popularity regression for hitcast.
//!
//! Loads an externally feature-engineered table, fits a 100-tree random
//! forest on an 80/20 split, reports MSE and R², and renders a ranked
//! feature-importance bar chart. Everything is seeded: repeated runs on
//! the same table produce identical splits, fits, and rankings.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod features;
pub mod importance;
pub mod train;

pub use error::{ModelError, ModelResult};
pub use features::{FeatureRow, SplitData, FEATURE_NAMES};
pub use train::{Evaluation, PopularityModel};
