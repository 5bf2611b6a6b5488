//! Tests for the Catalog Service client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a running catalog.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yurt_catalog_client::{CatalogClient, CatalogConfig, CatalogError};
use yurt_core::{Catalog, TrackId};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig::new(format!("{}/api", server.uri()))).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = CatalogClient::new(CatalogConfig::new(""));

        match result.unwrap_err() {
            CatalogError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("radio.local/api"));

        match result.unwrap_err() {
            CatalogError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_custom_timeouts_accepted() {
        let config = CatalogConfig::new("http://localhost:5000/api")
            .with_timeouts(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(CatalogClient::new(config).is_ok());
    }
}

// =============================================================================
// Random Track Tests
// =============================================================================

mod random_track {
    use super::*;

    #[tokio::test]
    async fn test_fetch_random_track() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "title": "Song Title",
                "author": "Artist Name",
                "duration": 245,
                "file_path": "artist/song.mp3",
                "stream_url": "/api/stream/42"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let track = client.random_track().await.unwrap();

        assert_eq!(track.id, TrackId::new("42"));
        assert_eq!(track.file_path, "artist/song.mp3");
        assert_eq!(track.author, "Artist Name");
        assert_eq!(track.duration, 245.0);
    }

    #[tokio::test]
    async fn test_not_found_means_empty_catalog() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.random_track().await.unwrap_err();

        assert_eq!(err, CatalogError::EmptyCatalog);
    }

    #[tokio::test]
    async fn test_null_body_means_empty_catalog() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.random_track().await.unwrap_err();

        assert!(err.is_empty_catalog());
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "database locked"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        match client.random_track().await.unwrap_err() {
            CatalogError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database locked");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_malformed_track_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        match client.random_track().await.unwrap_err() {
            CatalogError::ParseError(msg) => assert!(msg.contains("track")),
            e => panic!("Expected ParseError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/track/random"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(serde_json::json!({"id": 1, "file_path": "a.mp3"})),
            )
            .mount(&mock_server)
            .await;

        let config = CatalogConfig::new(format!("{}/api", mock_server.uri()))
            .with_timeouts(Duration::from_millis(200), Duration::from_millis(200));
        let client = CatalogClient::new(config).unwrap();

        assert_eq!(client.random_track().await.unwrap_err(), CatalogError::Timeout);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Port 9 (discard) is closed on test machines
        let client = CatalogClient::new(
            CatalogConfig::new("http://127.0.0.1:9/api")
                .with_timeouts(Duration::from_secs(2), Duration::from_secs(1)),
        )
        .unwrap();

        match client.random_track().await.unwrap_err() {
            CatalogError::Unreachable(_) | CatalogError::Timeout => {}
            e => panic!("Expected Unreachable, got: {:?}", e),
        }
    }
}

// =============================================================================
// Stats Tests
// =============================================================================

mod stats {
    use super::*;

    #[tokio::test]
    async fn test_fetch_stats() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_tracks": 150,
                "total_duration": 36125,
                "most_played": {
                    "id": 9,
                    "title": "Hit",
                    "author": "Band",
                    "play_count": 12,
                    "file_path": "band/hit.mp3"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let stats = client.stats().await.unwrap();

        assert_eq!(stats.total_tracks, 150);
        assert_eq!(
            stats.summary(),
            "150 songs | total runtime - 10:02:05 | most played - Hit"
        );
    }

    #[tokio::test]
    async fn test_stats_not_found_is_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        match client.stats().await.unwrap_err() {
            CatalogError::ServerError { status, .. } => assert_eq!(status, 404),
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_malformed_stats_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_tracks": "lots"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        assert!(matches!(
            client.stats().await.unwrap_err(),
            CatalogError::ParseError(_)
        ));
    }
}

// =============================================================================
// Health Tests
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let health = client.health().await.unwrap();

        assert!(health.is_ok());
    }

    #[tokio::test]
    async fn test_health_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);

        match client.health().await.unwrap_err() {
            CatalogError::ServerError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }
}
