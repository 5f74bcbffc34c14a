//! Editing operations that sit beside the filter engine.
//!
//! - `transform`: quarter-turn rotation and cropping
//! - `overlay`: freehand strokes drawn over the image

pub mod overlay;
pub mod transform;

pub use overlay::{Overlay, Stroke};
pub use transform::{crop, rotate_left, rotate_right, CropRect};
