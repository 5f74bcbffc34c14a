//! Geometric edits: quarter-turn rotation and rectangular crop.
//!
//! Unlike filters these change the raster's dimensions, so they live outside
//! the filter registry. Each returns a new raster.

use crate::core::error::{EditError, FilterResult, PixelworksResult};
use crate::core::raster::{PixelReader, Raster};
use image::imageops;
use serde::{Deserialize, Serialize};

/// Rotate 90° counter-clockwise.
pub fn rotate_left(source: &Raster) -> FilterResult<Raster> {
    Raster::from_buffer(imageops::rotate270(source.as_buffer()))
}

/// Rotate 90° clockwise.
pub fn rotate_right(source: &Raster) -> FilterResult<Raster> {
    Raster::from_buffer(imageops::rotate90(source.as_buffer()))
}

/// Where pixel `(x, y)` lands after [`rotate_left`] on a raster `width` wide.
pub fn rotate_left_point((x, y): (f32, f32), width: u32) -> (f32, f32) {
    (y, width as f32 - 1.0 - x)
}

/// Where pixel `(x, y)` lands after [`rotate_right`] on a raster `height` tall.
pub fn rotate_right_point((x, y): (f32, f32), height: u32) -> (f32, f32) {
    (height as f32 - 1.0 - y, x)
}

/// Axis-aligned crop region in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region spanned by a pointer drag from `start` to `end`.
    ///
    /// A drag that does not move right and down by at least one pixel is a
    /// cancelled crop and yields `None`. Coordinates left of or above the
    /// image are clamped to 0.
    pub fn from_drag(start: (f64, f64), end: (f64, f64)) -> Option<Self> {
        let width = end.0 - start.0;
        let height = end.1 - start.1;
        if width < 1.0 || height < 1.0 {
            return None;
        }
        let x = start.0.max(0.0);
        let y = start.1.max(0.0);
        let right = end.0.max(0.0);
        let bottom = end.1.max(0.0);
        let rect = Self::new(
            x.floor() as u32,
            y.floor() as u32,
            (right - x).floor() as u32,
            (bottom - y).floor() as u32,
        );
        (rect.width > 0 && rect.height > 0).then_some(rect)
    }

    /// Parse `"x,y,width,height"`.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<u32> = text
            .split(',')
            .map(|p| p.trim().parse().ok())
            .collect::<Option<Vec<_>>>()?;
        match parts.as_slice() {
            [x, y, w, h] => Some(Self::new(*x, *y, *w, *h)),
            _ => None,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Intersection with a `width`×`height` image, if non-empty.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Self> {
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        if self.x >= right || self.y >= bottom {
            return None;
        }
        Some(Self::new(self.x, self.y, right - self.x, bottom - self.y))
    }
}

/// Cut `rect` out of `source`, clipped to the image.
///
/// Fails with [`EditError::EmptyCrop`] when the region misses the image.
pub fn crop(source: &Raster, rect: CropRect) -> PixelworksResult<Raster> {
    let (width, height) = source.dimensions();
    let clipped = rect.clip_to(width, height).ok_or(EditError::EmptyCrop {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        image_width: width,
        image_height: height,
    })?;
    let view = imageops::crop_imm(
        source.as_buffer(),
        clipped.x,
        clipped.y,
        clipped.width,
        clipped.height,
    );
    Ok(Raster::from_buffer(view.to_image())?)
}
