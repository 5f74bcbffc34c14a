//! Error types for Pixelworks.
//!
//! Uses thiserror for structured errors with context. The engine-level
//! [`FilterError`] is small and cloneable so it can be compared in tests and
//! serialized for callers; [`PixelworksError`] wraps everything that can go
//! wrong once files and configuration are involved.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for Pixelworks.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum PixelworksError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by raster access and filter application.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Destination is {actual:?} but source is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors from filter lookup and registration.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryError {
    #[error("Filter '{0}' not found")]
    UnknownFilter(String),

    #[error("A filter named '{0}' is already registered")]
    DuplicateName(String),
}

/// Errors from editing operations outside the filter engine.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditError {
    #[error("Crop {width}x{height} at ({x}, {y}) misses the {image_width}x{image_height} image")]
    EmptyCrop {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("No stroke in progress")]
    NoActiveStroke,

    #[error("No image is loaded")]
    NoImage,
}

// ============================================================================
// Error Utilities
// ============================================================================

impl FilterError {
    /// Build an out-of-bounds error for a coordinate on a raster of the given size.
    pub fn out_of_bounds(x: u32, y: u32, (width, height): (u32, u32)) -> Self {
        FilterError::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this error signals a bug in the caller rather than bad data.
    ///
    /// The engine allocates its own destinations, so a size mismatch can only
    /// come from code that hands in a hand-made destination.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, FilterError::DimensionMismatch { .. })
    }
}

impl EditError {
    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            EditError::EmptyCrop {
                image_width,
                image_height,
                ..
            } => Some(format!(
                "Choose a region inside 0..{} x 0..{}",
                image_width, image_height
            )),
            EditError::NoActiveStroke => Some("Begin a stroke before extending it".to_string()),
            EditError::NoImage => Some("Open an image first".to_string()),
        }
    }
}

/// Result type alias for raster and filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Result type alias for Pixelworks operations.
pub type PixelworksResult<T> = Result<T, PixelworksError>;
