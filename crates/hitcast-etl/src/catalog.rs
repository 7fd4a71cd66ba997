//! Spotify Web API client adapter.
//!
//! Wraps authentication (client-credentials grant) and the four raw catalog
//! calls the pipeline consumes: artist search, artist album listing, album
//! track listing, and bulk track lookup. Every request carries a 30 s
//! timeout and transient failures are retried up to three times before the
//! error surfaces to the caller.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};

const API_BASE: &str = "https://api.spotify.com/v1";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const USER_AGENT: &str = "hitcast/0.1.0 (https://github.com/oxidelab/hitcast)";

/// Page size for album and track listings, and the bulk-lookup maximum.
pub const PAGE_LIMIT: u32 = 50;

/// Request timeout, matching the catalog service's slowest documented calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Attempts per request before a transient error surfaces.
const REQUEST_ATTEMPTS: usize = 3;

/// Tokens are refreshed this long before the service-reported expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Client id and secret for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// One page of a paginated listing. End of pagination is an empty `items`.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    artists: Page<ArtistRef>,
}

/// An artist as referenced by search results and track credits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// An album as listed under an artist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
}

/// A track as listed under an album. Only the id is needed at crawl time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct TracksResponse {
    tracks: Vec<Option<TrackDetail>>,
}

/// Full track details from the bulk lookup endpoint.
///
/// Entries come back `null` when a track is unavailable (for example
/// region-restricted); the fetcher skips those.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackDetail {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub explicit: bool,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: AlbumSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumSummary {
    pub release_date: String,
}

// ---------------------------------------------------------------------------
// Catalog seam
// ---------------------------------------------------------------------------

/// The four catalog operations the pipeline consumes.
///
/// [`SpotifyClient`] is the production implementation; tests script the
/// trait directly to exercise pagination, dedup, and retry behaviour
/// without a network.
#[async_trait::async_trait]
pub trait CatalogApi {
    /// Single-best-match artist search. `None` when the search came back
    /// empty; errors are *not* swallowed here.
    async fn search_artist(&self, name: &str) -> CatalogResult<Option<ArtistRef>>;

    /// One page of the artist's albums and singles, starting at `offset`.
    async fn artist_albums(&self, artist_id: &str, offset: u32) -> CatalogResult<Vec<AlbumRef>>;

    /// One page of an album's tracks, starting at `offset`.
    async fn album_tracks(&self, album_id: &str, offset: u32) -> CatalogResult<Vec<TrackRef>>;

    /// Bulk track lookup for up to [`PAGE_LIMIT`] ids per call.
    async fn tracks_bulk(&self, ids: &[String]) -> CatalogResult<Vec<Option<TrackDetail>>>;
}

// ---------------------------------------------------------------------------
// Production client
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct TokenState {
    access_token: String,
    expires_at: Instant,
}

/// Authenticated Spotify Web API client.
#[derive(Debug)]
pub struct SpotifyClient {
    http: Client,
    credentials: Credentials,
    token: Mutex<Option<TokenState>>,
}

impl SpotifyClient {
    /// Establish an authenticated session.
    ///
    /// Requests an initial access token immediately, so bad credentials
    /// fail here rather than on the first catalog call.
    pub async fn connect(credentials: Credentials) -> CatalogResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        let client = Self {
            http,
            credentials,
            token: Mutex::new(None),
        };
        client.refresh_token().await?;
        log::info!("connected to catalog service");
        Ok(client)
    }

    /// Fetch a fresh access token via the client-credentials grant and
    /// cache it until shortly before expiry.
    async fn refresh_token(&self) -> CatalogResult<String> {
        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Auth(format!(
                "token endpoint returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                endpoint: "/api/token".to_string(),
            });
        }

        let token: TokenResponse =
            response.json().await.map_err(|e| CatalogError::Parse {
                endpoint: "/api/token".to_string(),
                message: e.to_string(),
            })?;

        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access_token = token.access_token;
        *self
            .token
            .lock()
            .expect("token cache lock poisoned") = Some(TokenState {
            access_token: access_token.clone(),
            expires_at,
        });
        Ok(access_token)
    }

    /// Return the cached token, refreshing it when it is about to expire.
    /// A crawl of a large back catalog outlives the one-hour token.
    async fn bearer(&self) -> CatalogResult<String> {
        {
            let cache = self.token.lock().expect("token cache lock poisoned");
            if let Some(state) = cache.as_ref() {
                if state.expires_at > Instant::now() {
                    return Ok(state.access_token.clone());
                }
            }
        }
        log::debug!("access token expired, refreshing");
        self.refresh_token().await
    }

    /// GET a catalog endpoint and decode the JSON body, retrying transient
    /// failures up to [`REQUEST_ATTEMPTS`] times.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> CatalogResult<T> {
        let url = format!("{API_BASE}{path}");

        let fetch = || async {
            let token = self.bearer().await?;
            let response = self
                .http
                .get(&url)
                .bearer_auth(&token)
                .query(query)
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(CatalogError::RateLimited);
            }
            if !status.is_success() {
                return Err(CatalogError::Http {
                    status: status.as_u16(),
                    endpoint: path.to_string(),
                });
            }

            response.json::<T>().await.map_err(|e| CatalogError::Parse {
                endpoint: path.to_string(),
                message: e.to_string(),
            })
        };

        fetch
            .retry(
                ExponentialBuilder::default().with_max_times(REQUEST_ATTEMPTS - 1),
            )
            .when(CatalogError::is_transient)
            .notify(|err: &CatalogError, delay: Duration| {
                log::warn!("transient catalog error ({err}), retrying in {delay:?}");
            })
            .await
    }
}

#[async_trait::async_trait]
impl CatalogApi for SpotifyClient {
    async fn search_artist(&self, name: &str) -> CatalogResult<Option<ArtistRef>> {
        let response: SearchResponse = self
            .get_json(
                "/search",
                &[
                    ("q", name.to_string()),
                    ("type", "artist".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(response.artists.items.into_iter().next())
    }

    async fn artist_albums(&self, artist_id: &str, offset: u32) -> CatalogResult<Vec<AlbumRef>> {
        // Restricted to albums and singles: appears-on and compilation
        // listings repeat material the artist does not own.
        let path = format!("/artists/{artist_id}/albums");
        let page: Page<AlbumRef> = self
            .get_json(
                &path,
                &[
                    ("include_groups", "album,single".to_string()),
                    ("limit", PAGE_LIMIT.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    async fn album_tracks(&self, album_id: &str, offset: u32) -> CatalogResult<Vec<TrackRef>> {
        let path = format!("/albums/{album_id}/tracks");
        let page: Page<TrackRef> = self
            .get_json(
                &path,
                &[
                    ("limit", PAGE_LIMIT.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(page.items)
    }

    async fn tracks_bulk(&self, ids: &[String]) -> CatalogResult<Vec<Option<TrackDetail>>> {
        let response: TracksResponse = self
            .get_json("/tracks", &[("ids", ids.join(","))])
            .await?;
        Ok(response.tracks)
    }
}
