//! Editing session: the current image, its overlay and the filters.
//!
//! The session is the stateful layer above the pure engine. Every edit
//! replaces the current raster with a new one; the overlay follows rotate
//! and crop but is left alone by filters.

use crate::core::config::EditorConfig;
use crate::core::error::{EditError, PixelworksResult};
use crate::core::raster::{PixelReader, Raster};
use crate::edit::overlay::Overlay;
use crate::edit::transform::{self, CropRect};
use crate::filters::kind::ApplyOptions;
use crate::filters::registry::FilterRegistry;
use crate::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One open image and everything drawn on it.
#[derive(Debug, Clone)]
pub struct EditSession {
    registry: FilterRegistry,
    config: EditorConfig,
    options: ApplyOptions,
    current: Option<Raster>,
    overlay: Overlay,
    source_path: Option<PathBuf>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    /// An empty session with the built-in filters.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_registry(FilterRegistry::with_builtins(), config)
    }

    /// An empty session using a custom registry.
    pub fn with_registry(registry: FilterRegistry, config: EditorConfig) -> Self {
        Self {
            options: ApplyOptions::from(&config.processing),
            overlay: Overlay::new(&config.overlay),
            registry,
            config,
            current: None,
            source_path: None,
        }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The file the current image was opened from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The current image without the overlay.
    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref()
    }

    fn require_image(&self) -> Result<&Raster, EditError> {
        self.current.as_ref().ok_or(EditError::NoImage)
    }

    /// Load `path` as the current image, discarding all strokes.
    pub fn open(&mut self, path: impl AsRef<Path>) -> PixelworksResult<()> {
        let path = path.as_ref();
        let raster = io::load_raster(path)?;
        self.load(raster);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Use `raster` as the current image, discarding all strokes.
    pub fn load(&mut self, raster: Raster) {
        self.current = Some(raster);
        self.overlay.clear();
        self.source_path = None;
    }

    /// Replace the current image with the named filter's output.
    pub fn apply_filter(&mut self, name: &str) -> PixelworksResult<()> {
        let source = self.require_image()?;
        let start = Instant::now();
        let filtered = self.registry.apply(name, source, &self.options)?;
        log::debug!(
            "{} on {}x{} took {:?}",
            name,
            filtered.width(),
            filtered.height(),
            start.elapsed()
        );
        log::info!("Applied filter {}", name);
        self.current = Some(filtered);
        Ok(())
    }

    /// Rotate the image and overlay 90° counter-clockwise.
    pub fn rotate_left(&mut self) -> PixelworksResult<()> {
        let source = self.require_image()?;
        let width = source.width();
        let rotated = transform::rotate_left(source)?;
        self.overlay.rotate_left(width);
        self.current = Some(rotated);
        log::info!("Rotated left");
        Ok(())
    }

    /// Rotate the image and overlay 90° clockwise.
    pub fn rotate_right(&mut self) -> PixelworksResult<()> {
        let source = self.require_image()?;
        let height = source.height();
        let rotated = transform::rotate_right(source)?;
        self.overlay.rotate_right(height);
        self.current = Some(rotated);
        log::info!("Rotated right");
        Ok(())
    }

    /// Crop the image and overlay to `rect`.
    pub fn crop(&mut self, rect: CropRect) -> PixelworksResult<()> {
        let source = self.require_image()?;
        let cropped = transform::crop(source, rect)?;
        self.overlay.crop(rect);
        log::info!(
            "Cropped to {}x{} at ({}, {})",
            cropped.width(),
            cropped.height(),
            rect.x,
            rect.y
        );
        self.current = Some(cropped);
        Ok(())
    }

    /// Crop to the region of a pointer drag.
    ///
    /// Returns `false` and leaves the image unchanged when the drag is
    /// cancelled (it did not move right and down).
    pub fn crop_drag(&mut self, start: (f64, f64), end: (f64, f64)) -> PixelworksResult<bool> {
        self.require_image()?;
        match CropRect::from_drag(start, end) {
            Some(rect) => {
                self.crop(rect)?;
                Ok(true)
            }
            None => {
                log::warn!("Crop cancelled: drag from {:?} to {:?}", start, end);
                Ok(false)
            }
        }
    }

    pub fn begin_stroke(&mut self, point: (f32, f32)) -> PixelworksResult<()> {
        self.require_image()?;
        self.overlay.begin_stroke(point);
        Ok(())
    }

    pub fn extend_stroke(&mut self, point: (f32, f32)) -> PixelworksResult<()> {
        Ok(self.overlay.extend_stroke(point)?)
    }

    pub fn end_stroke(&mut self) -> PixelworksResult<()> {
        Ok(self.overlay.end_stroke()?)
    }

    /// Erase all strokes.
    pub fn clear_strokes(&mut self) {
        self.overlay.clear();
    }

    /// The current image with the overlay burnt in.
    pub fn flattened(&self) -> PixelworksResult<Raster> {
        let source = self.require_image()?;
        Ok(self.overlay.flatten(source)?)
    }

    /// Flatten and write the image to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> PixelworksResult<()> {
        let image = self.flattened()?;
        io::save_raster(&image, path, &self.config.output)
    }
}
