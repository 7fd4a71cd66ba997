//! Catalog crawl: from artist ids to a deduplicated track id set.
//!
//! Pages through each artist's albums and singles, then through each
//! album's tracks, with an offset cursor that advances by the number of
//! items returned and terminates on the first empty page. A failure while
//! fetching a page abandons that pager only; everything collected so far
//! is kept and the crawl moves on.

use std::collections::HashSet;

use crate::catalog::CatalogApi;

/// Crawl every album and single of every artist in `artist_ids` and return
/// the set of track ids seen.
///
/// The same recording often appears on several releases (album, deluxe
/// edition, single, compilation); the set collapses those. Iteration order
/// of the result is unspecified.
pub async fn crawl_track_ids<C>(api: &C, artist_ids: &[String]) -> HashSet<String>
where
    C: CatalogApi + Sync,
{
    let mut track_ids = HashSet::new();

    for artist_id in artist_ids {
        log::info!("crawling releases for artist {artist_id}");

        let mut album_offset = 0;
        loop {
            let albums = match api.artist_albums(artist_id, album_offset).await {
                Ok(albums) => albums,
                Err(e) => {
                    log::warn!("failed to list albums for artist {artist_id}: {e}");
                    break;
                }
            };
            if albums.is_empty() {
                break;
            }

            for album in &albums {
                let mut track_offset = 0;
                loop {
                    let tracks = match api.album_tracks(&album.id, track_offset).await {
                        Ok(tracks) => tracks,
                        Err(e) => {
                            log::warn!("failed to list tracks for album {}: {e}", album.id);
                            break;
                        }
                    };
                    if tracks.is_empty() {
                        break;
                    }

                    track_offset += tracks.len() as u32;
                    for track in tracks {
                        track_ids.insert(track.id);
                    }
                }
            }

            album_offset += albums.len() as u32;
        }
    }

    log::info!("found {} unique tracks", track_ids.len());
    track_ids
}
