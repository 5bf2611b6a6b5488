//! Catalog Service client.

use crate::error::{from_status, from_transport};
use crate::types::{CatalogConfig, HealthStatus};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;
use yurt_core::{Catalog, CatalogError, Result, Stats, Track, TrackId};

/// HTTP client for the Catalog Service.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use yurt_catalog_client::{CatalogClient, CatalogConfig};
/// use yurt_core::Catalog;
///
/// let client = CatalogClient::new(CatalogConfig::new("http://127.0.0.1:5000/api"))?;
/// let stats = client.stats().await?;
/// println!("{}", stats.summary());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("YurtRadio/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(from_transport)?;

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.get("/health").await?;

        if response.status().is_success() {
            decode(response, "health").await
        } else {
            Err(from_status(response).await)
        }
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Catalog request");

        self.http.get(&url).send().await.map_err(from_transport)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn random_track(&self) -> Result<Track> {
        let response = self.get("/track/random").await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("Catalog has no track to offer");
            return Err(CatalogError::EmptyCatalog);
        }
        if !status.is_success() {
            return Err(from_status(response).await);
        }

        // A `null` body means the same as a 404
        let track: Option<Track> = decode(response, "track").await?;
        let track = track.ok_or(CatalogError::EmptyCatalog)?;

        info!(
            track_id = %track.id,
            file_path = %track.file_path,
            duration = track.duration,
            "Fetched random track"
        );

        Ok(track)
    }

    async fn stats(&self) -> Result<Stats> {
        let response = self.get("/stats").await?;

        if !response.status().is_success() {
            return Err(from_status(response).await);
        }

        let stats: Stats = decode(response, "stats").await?;
        debug!(
            total_tracks = stats.total_tracks,
            total_duration = stats.total_duration,
            "Fetched stats"
        );

        Ok(stats)
    }

    fn stream_url(&self, id: &TrackId) -> String {
        format!("{}/stream/{}", self.base_url, id)
    }
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let body = response.bytes().await.map_err(from_transport)?;

    serde_json::from_slice(&body)
        .map_err(|e| CatalogError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(CatalogClient::new(CatalogConfig::new("https://example.com/api")).is_ok());
        assert!(CatalogClient::new(CatalogConfig::new("http://127.0.0.1:5000/api")).is_ok());

        // Invalid URLs
        assert!(CatalogClient::new(CatalogConfig::new("")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("   ")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("not-a-url")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = CatalogClient::new(CatalogConfig::new("http://127.0.0.1:5000/api///"))
            .expect("valid url");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000/api");
    }

    #[test]
    fn test_stream_url() {
        let client =
            CatalogClient::new(CatalogConfig::new("http://radio.local/api/")).expect("valid url");
        assert_eq!(
            client.stream_url(&TrackId::new("42")),
            "http://radio.local/api/stream/42"
        );
    }
}
