//! Yurt Radio Catalog Client
//!
//! HTTP implementation of [`yurt_core::Catalog`] for the Catalog Service.
//!
//! # Endpoints
//!
//! - `GET /track/random` - one random track (404 when the catalog is empty)
//! - `GET /stats` - aggregate collection stats
//! - `GET /stream/{id}` - audio bytes, only referenced by URL
//! - `GET /health` - liveness probe
//!
//! # Example
//!
//! ```ignore
//! use yurt_catalog_client::{CatalogClient, CatalogConfig};
//! use yurt_core::Catalog;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("http://127.0.0.1:5000/api"))?;
//!
//!     let track = client.random_track().await?;
//!     println!("{} by {}", track.display_title(), track.display_author());
//!     println!("stream from {}", client.stream_url(&track.id));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use types::{CatalogConfig, HealthStatus};
pub use yurt_core::{CatalogError, Result};
