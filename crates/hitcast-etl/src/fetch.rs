//! Bulk track-detail fetch.
//!
//! Splits the crawled track ids into batches of [`PAGE_LIMIT`] and looks
//! each batch up in one call. A batch gets three attempts with a fixed
//! five-second pause between them; a batch that exhausts its attempts is
//! dropped whole and the fetch continues with the next one.

use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use hitcast_core::TrackRecord;

use crate::catalog::{CatalogApi, TrackDetail};
use crate::error::CatalogError;

/// Attempts per batch before the batch is dropped.
const BATCH_ATTEMPTS: usize = 3;

/// Pause between attempts on the same batch.
const BATCH_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fetch details for `track_ids` in batches of [`PAGE_LIMIT`]
/// and flatten the responses into [`TrackRecord`]s.
///
/// Null entries in a response (unavailable or region-restricted tracks)
/// are skipped. Batches are submitted strictly in order; a failed batch
/// never halts the ones after it.
///
/// [`PAGE_LIMIT`]: crate::catalog::PAGE_LIMIT
pub async fn fetch_track_details<C>(api: &C, track_ids: &[String]) -> Vec<TrackRecord>
where
    C: CatalogApi + Sync,
{
    let batch_size = crate::catalog::PAGE_LIMIT as usize;
    let batch_count = track_ids.len().div_ceil(batch_size);
    let mut records = Vec::new();
    let mut unavailable = 0usize;

    for (index, batch) in track_ids.chunks(batch_size).enumerate() {
        log::info!("fetching track details, batch {}/{batch_count}", index + 1);

        let result = (|| async { api.tracks_bulk(batch).await })
            .retry(
                ConstantBuilder::default()
                    .with_delay(BATCH_RETRY_DELAY)
                    .with_max_times(BATCH_ATTEMPTS - 1),
            )
            .when(CatalogError::is_transient)
            .notify(|err: &CatalogError, delay: Duration| {
                log::warn!(
                    "batch {} failed ({err}), retrying in {delay:?}",
                    index + 1
                );
            })
            .await;

        let details = match result {
            Ok(details) => details,
            Err(e) => {
                log::warn!("dropping batch {} after repeated failures: {e}", index + 1);
                continue;
            }
        };

        for detail in details {
            match detail {
                Some(detail) => records.push(to_record(detail)),
                None => unavailable += 1,
            }
        }
    }

    if unavailable > 0 {
        log::debug!("skipped {unavailable} unavailable tracks");
    }
    log::info!("fetched details for {} tracks", records.len());
    records
}

/// Flatten one bulk-lookup entry into a [`TrackRecord`].
fn to_record(detail: TrackDetail) -> TrackRecord {
    let artists_full = detail
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let primary_artist_id = detail.artists.first().map(|artist| artist.id.clone());

    TrackRecord {
        id: detail.id,
        name: detail.name,
        popularity: detail.popularity,
        artists_full,
        primary_artist_id,
        explicit: detail.explicit,
        release_date: detail.album.release_date,
    }
}
