//! Integration tests for the full resolve → crawl → fetch → write pipeline.
//!
//! These tests run against a scripted in-memory catalog, so no credentials
//! or network access are needed.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use tempfile::TempDir;

use hitcast_core::dataset;
use hitcast_etl::catalog::{
    AlbumRef, AlbumSummary, ArtistRef, CatalogApi, TrackDetail, TrackRef, PAGE_LIMIT,
};
use hitcast_etl::error::{CatalogError, CatalogResult};
use hitcast_etl::pipeline;

/// A small scripted catalog: two artists, overlapping releases, one
/// optionally broken album pager and one optionally failing bulk batch.
#[derive(Default)]
struct ScriptedCatalog {
    artists: HashMap<String, ArtistRef>,
    albums: HashMap<String, Vec<AlbumRef>>,
    tracks: HashMap<String, Vec<String>>,
    details: HashMap<String, TrackDetail>,
    failing_artists: HashSet<String>,
    bulk_calls: Mutex<usize>,
    fail_all_bulk: bool,
}

impl ScriptedCatalog {
    fn add_artist(&mut self, name: &str, id: &str) {
        self.artists.insert(
            name.to_string(),
            ArtistRef {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
    }

    fn add_album(&mut self, artist_id: &str, album_id: &str, track_ids: &[&str]) {
        self.albums
            .entry(artist_id.to_string())
            .or_default()
            .push(AlbumRef {
                id: album_id.to_string(),
                name: album_id.to_string(),
            });
        self.tracks.insert(
            album_id.to_string(),
            track_ids.iter().map(|t| (*t).to_string()).collect(),
        );
    }

    fn add_detail(&mut self, track_id: &str, name: &str, artist_id: &str, popularity: u32) {
        self.details.insert(
            track_id.to_string(),
            TrackDetail {
                id: track_id.to_string(),
                name: name.to_string(),
                popularity,
                explicit: false,
                artists: vec![ArtistRef {
                    id: artist_id.to_string(),
                    name: "Somebody".to_string(),
                }],
                album: AlbumSummary {
                    release_date: "2016-04-29".to_string(),
                },
            },
        );
    }
}

fn page<T: Clone>(items: Option<&Vec<T>>, offset: u32) -> Vec<T> {
    items
        .map(|items| {
            items
                .iter()
                .skip(offset as usize)
                .take(PAGE_LIMIT as usize)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl CatalogApi for ScriptedCatalog {
    async fn search_artist(&self, name: &str) -> CatalogResult<Option<ArtistRef>> {
        Ok(self.artists.get(name).cloned())
    }

    async fn artist_albums(&self, artist_id: &str, offset: u32) -> CatalogResult<Vec<AlbumRef>> {
        if self.failing_artists.contains(artist_id) {
            return Err(CatalogError::Http {
                status: 500,
                endpoint: format!("/artists/{artist_id}/albums"),
            });
        }
        Ok(page(self.albums.get(artist_id), offset))
    }

    async fn album_tracks(&self, album_id: &str, offset: u32) -> CatalogResult<Vec<TrackRef>> {
        let ids = page(self.tracks.get(album_id), offset);
        Ok(ids.into_iter().map(|id| TrackRef { id }).collect())
    }

    async fn tracks_bulk(&self, ids: &[String]) -> CatalogResult<Vec<Option<TrackDetail>>> {
        *self.bulk_calls.lock().unwrap() += 1;
        if self.fail_all_bulk {
            return Err(CatalogError::Parse {
                endpoint: "/tracks".to_string(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(ids.iter().map(|id| self.details.get(id).cloned()).collect())
    }
}

fn scripted_catalog() -> ScriptedCatalog {
    let mut api = ScriptedCatalog::default();
    api.add_artist("Outkast", "a-outkast");
    api.add_artist("Missy Elliott", "a-missy");

    // The single repeats an album track under a different track id but the
    // same (name, artist) pair; the writer keeps the more popular one.
    api.add_album("a-outkast", "alb-1", &["t1", "t2"]);
    api.add_album("a-outkast", "single-1", &["t3"]);
    api.add_album("a-missy", "alb-2", &["t4"]);

    api.add_detail("t1", "Elevators", "a-outkast", 74);
    api.add_detail("t2", "Jazzy Belle", "a-outkast", 61);
    api.add_detail("t3", "Elevators", "a-outkast", 80);
    api.add_detail("t4", "The Rain", "a-missy", 70);
    api
}

#[tokio::test]
async fn test_pipeline_end_to_end_writes_deduplicated_dataset() {
    let api = scripted_catalog();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("raw_data.csv");

    let summary = pipeline::run(&api, &["Outkast", "Missy Elliott", "Unknown Act"], &output)
        .await
        .unwrap();

    assert_eq!(summary.artists_resolved, 2);
    assert_eq!(summary.unique_tracks, 4);
    assert_eq!(summary.records_fetched, 4);
    assert_eq!(summary.rows_written, 3);

    let rows = dataset::read_tracks(&output).unwrap();
    assert_eq!(rows.len(), 3);

    let elevators: Vec<_> = rows.iter().filter(|r| r.name == "Elevators").collect();
    assert_eq!(elevators.len(), 1);
    assert_eq!(elevators[0].popularity, 80);
}

#[tokio::test]
async fn test_pipeline_survives_a_broken_artist() {
    let mut api = scripted_catalog();
    api.failing_artists.insert("a-outkast".to_string());
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("raw_data.csv");

    let summary = pipeline::run(&api, &["Outkast", "Missy Elliott"], &output)
        .await
        .unwrap();

    // Outkast's crawl aborted, Missy Elliott's tracks still landed.
    assert_eq!(summary.artists_resolved, 2);
    assert_eq!(summary.unique_tracks, 1);
    assert_eq!(summary.rows_written, 1);
}

#[tokio::test]
async fn test_pipeline_with_no_fetched_records_writes_nothing() {
    let mut api = scripted_catalog();
    api.fail_all_bulk = true;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("raw_data.csv");

    let summary = pipeline::run(&api, &["Outkast"], &output).await.unwrap();

    assert_eq!(summary.records_fetched, 0);
    assert_eq!(summary.rows_written, 0);
    assert!(!output.exists());
    // Parse errors are not transient: exactly one bulk attempt, no retries.
    assert_eq!(*api.bulk_calls.lock().unwrap(), 1);
}
