//! Core domain model for hitcast.
//!
//! This crate defines the harvested track record, the dedup policy for
//! conflicting variants of the same song, and the CSV dataset files the
//! ingestion and training pipelines exchange.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod dataset;
pub mod error;
pub mod track;

pub use error::{Error, Result};
pub use track::TrackRecord;
