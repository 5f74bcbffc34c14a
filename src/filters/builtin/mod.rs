//! Built-in filter implementations.
//!
//! This module contains the standard filters that ship with Pixelworks, in
//! the order a selection menu presents them.

mod color;
mod sharpen;

use crate::filters::registry::Filter;

/// All built-in filters in menu order.
pub fn all() -> Vec<Filter> {
    let mut filters = color::filters();
    filters.push(sharpen::filter());
    filters
}

// Re-export for direct access
pub use color::{
    black_and_white, force_blue, force_green, force_red, grayscale, invert, saturate, sepia,
    BLACK_AND_WHITE_THRESHOLD, SEPIA_MATRIX,
};
pub use sharpen::{sharpen, Kernel3, SHARPEN_KERNEL};
