//! Core types for the Pixelworks editing system.
//!
//! This module contains the foundational types shared by the filter engine
//! and the editing layer:
//! - Normalized colors
//! - Rasters with separate reader and writer roles
//! - Error types
//! - Configuration

pub mod color;
pub mod config;
pub mod error;
pub mod raster;

// Re-export commonly used types
pub use color::Color;
pub use config::{EditorConfig, OutputConfig, OverlayConfig, ProcessingConfig};
pub use error::{
    EditError, FilterError, FilterResult, PixelworksError, PixelworksResult, RegistryError,
};
pub use raster::{PixelReader, PixelWriter, Raster, RasterWriter, RowWriter};
