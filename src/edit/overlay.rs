//! Freehand drawing layer.
//!
//! Strokes are kept as polylines on top of the image and only burnt into
//! pixels by [`Overlay::flatten`]. Filters never see the overlay; rotation
//! and cropping move the stroke coordinates along with the image.

use crate::core::color::Color;
use crate::core::config::{OverlayConfig, MAX_STROKE_WIDTH};
use crate::core::error::{EditError, FilterResult};
use crate::core::raster::Raster;
use crate::edit::transform::{rotate_left_point, rotate_right_point, CropRect};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::{Deserialize, Serialize};

/// One freehand polyline in image pixel coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<(f32, f32)>,
}

impl Stroke {
    pub fn new(start: (f32, f32)) -> Self {
        Self {
            points: vec![start],
        }
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    fn push(&mut self, point: (f32, f32)) {
        self.points.push(point);
    }

    fn map_points<F: Fn((f32, f32)) -> (f32, f32)>(&mut self, f: F) {
        for p in &mut self.points {
            *p = f(*p);
        }
    }
}

/// Strokes drawn over the current image.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    color: Color,
    width: u32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}

impl Overlay {
    /// An empty overlay drawing with the configured pen.
    ///
    /// The width is clamped to 1..=`MAX_STROKE_WIDTH`.
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            strokes: Vec::new(),
            active: None,
            color: config.color(),
            width: config.stroke_width.clamp(1, MAX_STROKE_WIDTH),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke_width(&self) -> u32 {
        self.width
    }

    /// Finished strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Whether nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.active.is_none()
    }

    /// Start a new stroke at `point`. An unfinished stroke is kept.
    pub fn begin_stroke(&mut self, point: (f32, f32)) {
        if let Some(stroke) = self.active.take() {
            self.strokes.push(stroke);
        }
        self.active = Some(Stroke::new(point));
    }

    /// Continue the current stroke to `point`.
    pub fn extend_stroke(&mut self, point: (f32, f32)) -> Result<(), EditError> {
        self.active
            .as_mut()
            .ok_or(EditError::NoActiveStroke)?
            .push(point);
        Ok(())
    }

    /// Finish the current stroke.
    pub fn end_stroke(&mut self) -> Result<(), EditError> {
        let stroke = self.active.take().ok_or(EditError::NoActiveStroke)?;
        self.strokes.push(stroke);
        Ok(())
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    fn map_points<F: Fn((f32, f32)) -> (f32, f32) + Copy>(&mut self, f: F) {
        for stroke in self.strokes.iter_mut().chain(self.active.as_mut()) {
            stroke.map_points(f);
        }
    }

    /// Follow a left rotation of an image `width` pixels wide.
    pub fn rotate_left(&mut self, width: u32) {
        self.map_points(|p| rotate_left_point(p, width));
    }

    /// Follow a right rotation of an image `height` pixels tall.
    pub fn rotate_right(&mut self, height: u32) {
        self.map_points(|p| rotate_right_point(p, height));
    }

    /// Follow a crop; the region's top-left becomes the new origin.
    pub fn crop(&mut self, rect: CropRect) {
        let (dx, dy) = (rect.x as f32, rect.y as f32);
        self.map_points(|(x, y)| (x - dx, y - dy));
    }

    /// Copy of `base` with every stroke drawn on top.
    pub fn flatten(&self, base: &Raster) -> FilterResult<Raster> {
        if self.is_empty() {
            return Ok(base.clone());
        }

        let mut canvas = base.as_buffer().clone();
        let pixel = self.color.to_rgba();
        let offsets = pen_offsets(self.width);
        let radius = (self.width / 2) as i32;

        for stroke in self.strokes.iter().chain(self.active.as_ref()) {
            let points = stroke.points();
            if self.width > 1 {
                for &(x, y) in points {
                    let center = (x.round() as i32, y.round() as i32);
                    draw_filled_circle_mut(&mut canvas, center, radius, pixel);
                }
            } else if let [(x, y)] = points {
                draw_line_segment_mut(&mut canvas, (*x, *y), (*x, *y), pixel);
            }
            for segment in points.windows(2) {
                let (start, end) = (segment[0], segment[1]);
                for &(dx, dy) in &offsets {
                    draw_line_segment_mut(
                        &mut canvas,
                        (start.0 + dx, start.1 + dy),
                        (end.0 + dx, end.1 + dy),
                        pixel,
                    );
                }
            }
        }

        Raster::from_buffer(canvas)
    }
}

/// Offsets of a square pen `width` pixels across.
fn pen_offsets(width: u32) -> Vec<(f32, f32)> {
    let low = -((width as i32 - 1) / 2);
    let high = width as i32 / 2;
    (low..=high)
        .flat_map(|dx| (low..=high).map(move |dy| (dx as f32, dy as f32)))
        .collect()
}
