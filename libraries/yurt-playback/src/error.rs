//! Error types for playback sessions

use thiserror::Error;
use yurt_core::CatalogError;

/// Session errors
///
/// None of these end the session: each puts it in the `Error` status with a
/// user-visible message and leaves it ready for the next play/next command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// Catalog fetch failed or returned a non-success status
    #[error("Network error: {0}")]
    Network(CatalogError),

    /// Fetch succeeded but yielded no track
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// The audio engine reported an error
    #[error("Playback error: {0}")]
    Playback(String),
}

impl SessionError {
    /// Text shown in the status line
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Network(_) => "Error loading track",
            SessionError::EmptyCatalog => "No track available",
            SessionError::Playback(_) => "Error playing track",
        }
    }
}

impl From<CatalogError> for SessionError {
    fn from(err: CatalogError) -> Self {
        if err.is_empty_catalog() {
            SessionError::EmptyCatalog
        } else {
            SessionError::Network(err)
        }
    }
}
