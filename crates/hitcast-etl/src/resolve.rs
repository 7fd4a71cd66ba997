//! Artist name resolution.
//!
//! Maps display names to catalog artist identifiers with one limit-1 search
//! per name. Names without a match are skipped silently; output order is
//! input order minus skips.

use crate::catalog::CatalogApi;
use crate::error::CatalogResult;

/// Resolve `names` to catalog artist ids, dropping names with no match.
///
/// Search failures propagate to the caller. Unlike the album and track
/// pagers there is no per-name retry or skip-on-error here.
pub async fn resolve_artists<C>(api: &C, names: &[&str]) -> CatalogResult<Vec<String>>
where
    C: CatalogApi + Sync,
{
    let mut artist_ids = Vec::new();

    for name in names {
        match api.search_artist(name).await? {
            Some(artist) => {
                log::info!("resolved {name} to artist {}", artist.id);
                artist_ids.push(artist.id);
            }
            None => {
                log::debug!("no catalog match for {name}, skipping");
            }
        }
    }

    Ok(artist_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlbumRef, ArtistRef, TrackDetail, TrackRef};
    use crate::error::CatalogError;
    use std::collections::HashMap;

    /// Scripted catalog: known artist names resolve, one name always errors.
    struct StubCatalog {
        artists: HashMap<String, ArtistRef>,
        failing_name: Option<String>,
    }

    impl StubCatalog {
        fn with_artists(names: &[(&str, &str)]) -> Self {
            let artists = names
                .iter()
                .map(|(name, id)| {
                    (
                        (*name).to_string(),
                        ArtistRef {
                            id: (*id).to_string(),
                            name: (*name).to_string(),
                        },
                    )
                })
                .collect();
            Self {
                artists,
                failing_name: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl CatalogApi for StubCatalog {
        async fn search_artist(&self, name: &str) -> CatalogResult<Option<ArtistRef>> {
            if self.failing_name.as_deref() == Some(name) {
                return Err(CatalogError::Http {
                    status: 500,
                    endpoint: "/search".to_string(),
                });
            }
            Ok(self.artists.get(name).cloned())
        }

        async fn artist_albums(&self, _: &str, _: u32) -> CatalogResult<Vec<AlbumRef>> {
            Ok(Vec::new())
        }

        async fn album_tracks(&self, _: &str, _: u32) -> CatalogResult<Vec<TrackRef>> {
            Ok(Vec::new())
        }

        async fn tracks_bulk(&self, _: &[String]) -> CatalogResult<Vec<Option<TrackDetail>>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_resolves_in_input_order() {
        let api = StubCatalog::with_artists(&[("Nas", "a-nas"), ("Common", "a-common")]);

        let ids = resolve_artists(&api, &["Common", "Nas"]).await.unwrap();
        assert_eq!(ids, vec!["a-common".to_string(), "a-nas".to_string()]);
    }

    #[tokio::test]
    async fn test_unmatched_names_are_skipped_silently() {
        let api = StubCatalog::with_artists(&[("Nas", "a-nas")]);

        let ids = resolve_artists(&api, &["Nas", "Completely Unknown Act"])
            .await
            .unwrap();
        assert_eq!(ids, vec!["a-nas".to_string()]);
    }

    #[tokio::test]
    async fn test_output_never_longer_than_input() {
        let api = StubCatalog::with_artists(&[("Nas", "a-nas")]);
        let names = ["Nas", "Nobody", "Nas"];

        let ids = resolve_artists(&api, &names).await.unwrap();
        assert!(ids.len() <= names.len());
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let mut api = StubCatalog::with_artists(&[("Nas", "a-nas")]);
        api.failing_name = Some("Common".to_string());

        let result = resolve_artists(&api, &["Nas", "Common"]).await;
        assert!(matches!(result, Err(CatalogError::Http { status: 500, .. })));
    }
}
