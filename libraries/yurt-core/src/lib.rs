//! Yurt Radio - Core
//!
//! Shared domain types for the radio client:
//! - Catalog tracks and collection stats as served by the Catalog Service
//! - The [`Catalog`] trait, the seam between playback and the network
//! - Error taxonomy for catalog calls
//! - Display formatting for elapsed/total times

pub mod error;
pub mod time;
pub mod traits;
pub mod types;

pub use error::{CatalogError, Result};
pub use time::{format_progress, format_time, format_time_for_total};
pub use traits::Catalog;
pub use types::{MostPlayed, Stats, Track, TrackId};
