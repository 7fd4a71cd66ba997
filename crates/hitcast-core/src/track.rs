use serde::{Deserialize, Serialize};

/// One harvested track, flattened from a catalog bulk-lookup entry.
///
/// Field order matters: it is the column order of the raw dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Opaque track identifier issued by the catalog service.
    pub id: String,
    pub name: String,
    /// Popularity score in 0..=100.
    pub popularity: u32,
    /// Display names of all credited artists, comma-joined.
    pub artists_full: String,
    /// Identifier of the first credited artist, when any artist is credited.
    pub primary_artist_id: Option<String>,
    pub explicit: bool,
    /// Release date as reported by the catalog (year, year-month, or full date).
    pub release_date: String,
}

impl TrackRecord {
    /// Dedup key for collapsing variants of the same song (radio edit,
    /// deluxe-edition duplicate, single vs. album version).
    #[must_use]
    pub fn dedup_key(&self) -> (&str, Option<&str>) {
        (self.name.as_str(), self.primary_artist_id.as_deref())
    }
}
