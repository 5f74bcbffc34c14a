//! Editor configuration.
//!
//! Configuration is plain data loaded from TOML. Every section has defaults,
//! so an empty file is a valid configuration:
//!
//! ```toml
//! [processing]
//! parallel = true
//! min_parallel_pixels = 65536
//!
//! [overlay]
//! stroke_color = [1.0, 0.0, 0.0, 1.0]
//! stroke_width = 2
//!
//! [output]
//! jpeg_quality = 90
//! ```

use crate::core::color::Color;
use crate::core::error::{PixelworksError, PixelworksResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Images with fewer pixels than this are filtered on the calling thread.
pub const DEFAULT_MIN_PARALLEL_PIXELS: usize = 256 * 256;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default freehand stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Widest freehand stroke accepted, in pixels.
pub const MAX_STROKE_WIDTH: u32 = 64;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How filters are executed.
    pub processing: ProcessingConfig,
    /// Appearance of freehand strokes.
    pub overlay: OverlayConfig,
    /// Encoder settings.
    pub output: OutputConfig,
}

/// Filter execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Fill destination rows on the rayon pool.
    pub parallel: bool,
    /// Minimum pixel count before rows are spread across threads.
    pub min_parallel_pixels: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_pixels: DEFAULT_MIN_PARALLEL_PIXELS,
        }
    }
}

/// Freehand stroke settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// RGBA, each in [0, 1].
    pub stroke_color: [f32; 4],
    /// Line width in pixels.
    pub stroke_width: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let red = Color::RED;
        Self {
            stroke_color: [red.red(), red.green(), red.blue(), red.alpha()],
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl OverlayConfig {
    /// The stroke color as a [`Color`].
    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.stroke_color;
        Color::rgba(r, g, b, a)
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Quality for JPEG output (1-100).
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> PixelworksResult<Self> {
        let config: EditorConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> PixelworksResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> PixelworksResult<String> {
        toml::to_string_pretty(self).map_err(|e| PixelworksError::Config(e.to_string()))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> PixelworksResult<()> {
        if !(1..=MAX_STROKE_WIDTH).contains(&self.overlay.stroke_width) {
            return Err(PixelworksError::Config(format!(
                "overlay.stroke_width must be in 1..={}, got {}",
                MAX_STROKE_WIDTH, self.overlay.stroke_width
            )));
        }
        if !(1..=100).contains(&self.output.jpeg_quality) {
            return Err(PixelworksError::Config(format!(
                "output.jpeg_quality must be in 1..=100, got {}",
                self.output.jpeg_quality
            )));
        }
        if self
            .overlay
            .stroke_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(PixelworksError::Config(
                "overlay.stroke_color channels must be in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Enable or disable parallel filtering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.processing.parallel = parallel;
        self
    }

    /// Set the minimum image size for parallel filtering.
    pub fn with_min_parallel_pixels(mut self, pixels: usize) -> Self {
        self.processing.min_parallel_pixels = pixels;
        self
    }

    /// Set the stroke color.
    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.overlay.stroke_color = [color.red(), color.green(), color.blue(), color.alpha()];
        self
    }

    /// Set the stroke width, clamped to 1..=`MAX_STROKE_WIDTH` pixels.
    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.overlay.stroke_width = width.clamp(1, MAX_STROKE_WIDTH);
        self
    }

    /// Set the JPEG quality, clamped to 1-100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.output.jpeg_quality = quality.clamp(1, 100);
        self
    }
}
