//! Mapping of HTTP failures onto [`CatalogError`].

use crate::types::ErrorBody;
use reqwest::Response;
use yurt_core::CatalogError;

/// Classify a failed send or body read.
pub(crate) fn from_transport(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout
    } else if err.is_decode() {
        CatalogError::ParseError(err.to_string())
    } else {
        CatalogError::Unreachable(err.to_string())
    }
}

/// Build a `ServerError` from a non-success response.
///
/// Prefers the `{"error": "..."}` message the service sends, falling back
/// to the raw body.
pub(crate) async fn from_status(response: Response) -> CatalogError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);

    CatalogError::ServerError { status, message }
}
