//! Yurt Radio Library
//!
//! Terminal radio player for a Yurt catalog: configuration, a headless clock
//! engine and the line-oriented front-end.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod engine;
pub mod error;
pub mod terminal;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "yurt_radio=info,yurt_playback=info,yurt_catalog_client=info";

// Re-export commonly used types for convenience
pub use config::RadioConfig;
pub use engine::ClockEngine;
pub use error::{RadioError, Result};
pub use terminal::{parse_line, render, LineInput};
