//! Error types for globe construction.

use thiserror::Error;

/// Reasons a [`GlobeConfig`](crate::config::GlobeConfig) is rejected.
///
/// Stepping a valid globe never fails; configuration is the only fallible surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("globe radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("invalid range for `{field}`: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("`{field}` must lie in [{low}, {high}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        low: f32,
        high: f32,
    },
    #[error("particles up to size {max_size} do not fit a globe of radius {radius} (wall margin {margin})")]
    ParticleTooLarge {
        max_size: f32,
        radius: f32,
        margin: f32,
    },
}

/// Convenience alias for fallible globe operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
