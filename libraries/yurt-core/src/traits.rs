/// Core traits for Yurt Radio
use crate::error::Result;
use crate::types::{Stats, Track, TrackId};
use async_trait::async_trait;

/// Remote track catalog
///
/// Implemented over HTTP by `yurt-catalog-client`; playback code only sees
/// this trait so sessions can run against scripted catalogs in tests.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch one random track
    ///
    /// # Errors
    /// Returns [`CatalogError::EmptyCatalog`](crate::CatalogError::EmptyCatalog)
    /// when the service has no track to offer, other variants on transport
    /// or decoding failures.
    async fn random_track(&self) -> Result<Track>;

    /// Fetch aggregate collection stats
    async fn stats(&self) -> Result<Stats>;

    /// Source reference the audio engine streams `id` from
    ///
    /// Never fetched by the caller, only handed to the engine.
    fn stream_url(&self, id: &TrackId) -> String;
}
