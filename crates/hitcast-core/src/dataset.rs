//! Reading and writing the raw track dataset.
//!
//! The raw dataset is a UTF-8 CSV table with one row per distinct
//! `(name, primary_artist_id)` pair. When the same song was collected from
//! several releases, the variant with the highest popularity wins.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::track::TrackRecord;

/// Collapse duplicate songs, keeping the most popular variant of each.
///
/// Sorts descending by popularity (the sort is stable, so ties keep their
/// input order) and then keeps the first row seen for every dedup key.
#[must_use]
pub fn dedup_tracks(records: &[TrackRecord]) -> Vec<TrackRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.popularity.cmp(&a.popularity));

    let mut seen = HashSet::new();
    sorted.retain(|record| {
        seen.insert((record.name.clone(), record.primary_artist_id.clone()))
    });
    sorted
}

/// Deduplicate `records` and write them to `path`, overwriting any existing
/// file. Returns the number of rows written.
///
/// An empty input is a no-op: nothing is written and the target file is left
/// untouched.
pub fn write_tracks(path: &Path, records: &[TrackRecord]) -> Result<usize> {
    if records.is_empty() {
        log::info!("no track records to write, leaving {} untouched", path.display());
        return Ok(0);
    }

    let deduped = dedup_tracks(records);

    let mut writer = csv::Writer::from_path(path)?;
    for record in &deduped {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("wrote {} unique tracks to {}", deduped.len(), path.display());
    Ok(deduped.len())
}

/// Read a previously written track dataset back into memory.
pub fn read_tracks(path: &Path) -> Result<Vec<TrackRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
