/// Core types for Yurt Radio
mod ids;
mod stats;
mod track;

pub use ids::TrackId;
pub use stats::{MostPlayed, Stats};
pub use track::Track;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as `T::default()`
///
/// The catalog database leaves unscanned tags as NULL.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Seconds that must be finite and non-negative; `null` reads as zero
pub(crate) fn non_negative_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    Ok(if secs.is_finite() { secs.max(0.0) } else { 0.0 })
}
