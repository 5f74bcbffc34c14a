//! Raster storage with separate read and write capabilities.
//!
//! A [`Raster`] is read-only once built. Filters write into a
//! [`RasterWriter`], which only exposes `set`, and convert it into a fresh
//! `Raster` when every pixel has been written. Keeping the two roles in
//! different types means a filter signature shows at a glance that it never
//! reads the buffer it is filling.
//!
//! Pixels are stored as an `image::Rgba32FImage`, which makes conversion to
//! and from the `image` crate's decoders and encoders a plain buffer copy.

use crate::core::color::Color;
use crate::core::error::{FilterError, FilterResult};
use image::{DynamicImage, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};
use rayon::prelude::*;

const CHANNELS: usize = 4;

/// Read access to a grid of colors.
pub trait PixelReader {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Color at `(x, y)`, or `OutOfBounds`.
    fn get(&self, x: u32, y: u32) -> FilterResult<Color>;

    /// `(width, height)`.
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Whether a signed coordinate lies inside the grid.
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }
}

/// Write access to a grid of colors.
pub trait PixelWriter {
    /// Replace the color at `(x, y)`, or fail with `OutOfBounds`.
    fn set(&mut self, x: u32, y: u32, color: Color) -> FilterResult<()>;
}

fn check_dimensions(width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidInput(format!(
            "raster dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

/// Immutable W×H grid of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    buffer: Rgba32FImage,
}

impl Raster {
    /// Build a raster by evaluating `f` at every coordinate.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> FilterResult<Self>
    where
        F: FnMut(u32, u32) -> Color,
    {
        check_dimensions(width, height)?;
        let buffer = ImageBuffer::from_fn(width, height, |x, y| f(x, y).to_rgba());
        Ok(Self { buffer })
    }

    /// A raster of a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> FilterResult<Self> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Wrap raw interleaved RGBA samples, row-major from the top-left.
    ///
    /// Samples are clamped into [0, 1].
    pub fn from_raw(width: u32, height: u32, samples: Vec<f32>) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * CHANNELS;
        if samples.len() != expected {
            return Err(FilterError::InvalidInput(format!(
                "expected {} samples for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }
        let samples = samples
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();
        let buffer = ImageBuffer::from_raw(width, height, samples).ok_or_else(|| {
            FilterError::InvalidInput("sample buffer does not match dimensions".to_string())
        })?;
        Ok(Self { buffer })
    }

    /// Convert a decoded image of any pixel format.
    ///
    /// Float sources may hold values outside [0, 1]; they are clamped.
    pub fn from_dynamic(image: &DynamicImage) -> FilterResult<Self> {
        Self::from_buffer(image.to_rgba32f())
    }

    /// Adopt an existing float buffer, clamping its samples.
    pub fn from_buffer(buffer: Rgba32FImage) -> FilterResult<Self> {
        let (width, height) = buffer.dimensions();
        Self::from_raw(width, height, buffer.into_raw())
    }

    /// Borrow the underlying float buffer.
    pub fn as_buffer(&self) -> &Rgba32FImage {
        &self.buffer
    }

    /// Take the underlying float buffer.
    pub fn into_buffer(self) -> Rgba32FImage {
        self.buffer
    }

    /// Interleaved RGBA samples.
    pub fn samples(&self) -> &[f32] {
        self.buffer.as_raw()
    }

    /// As an `image` value, for encoders.
    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba32F(self.buffer.clone())
    }

    /// Quantized 8-bit copy.
    pub fn to_rgba8(&self) -> RgbaImage {
        self.to_dynamic().to_rgba8()
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        self.buffer
            .enumerate_pixels()
            .map(|(x, y, p)| (x, y, Color::from_rgba(p)))
    }
}

impl PixelReader for Raster {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn get(&self, x: u32, y: u32) -> FilterResult<Color> {
        self.buffer
            .get_pixel_checked(x, y)
            .map(Color::from_rgba)
            .ok_or_else(|| FilterError::out_of_bounds(x, y, self.dimensions()))
    }
}

/// Write-only destination raster.
///
/// Starts transparent black; callers are expected to overwrite every pixel
/// before calling [`RasterWriter::finish`].
#[derive(Debug)]
pub struct RasterWriter {
    buffer: Rgba32FImage,
}

impl RasterWriter {
    /// Allocate a destination of the given size.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            buffer: ImageBuffer::new(width, height),
        })
    }

    /// Allocate a destination matching `source`.
    pub fn matching<R: PixelReader + ?Sized>(source: &R) -> FilterResult<Self> {
        Self::new(source.width(), source.height())
    }

    /// `(width, height)` of the destination.
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Split into one writer per row, top to bottom.
    pub fn rows_mut(&mut self) -> Vec<RowWriter<'_>> {
        let (width, height) = self.buffer.dimensions();
        let stride = width as usize * CHANNELS;
        self.buffer
            .chunks_mut(stride)
            .enumerate()
            .map(|(y, samples)| RowWriter {
                y: y as u32,
                width,
                height,
                samples,
            })
            .collect()
    }

    /// Split into per-row writers for use on the rayon pool.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = RowWriter<'_>> {
        let (width, height) = self.buffer.dimensions();
        let stride = width as usize * CHANNELS;
        self.buffer
            .par_chunks_mut(stride)
            .enumerate()
            .map(move |(y, samples)| RowWriter {
                y: y as u32,
                width,
                height,
                samples,
            })
    }

    /// Seal the destination into a read-only raster.
    pub fn finish(self) -> Raster {
        Raster {
            buffer: self.buffer,
        }
    }
}

impl PixelWriter for RasterWriter {
    fn set(&mut self, x: u32, y: u32, color: Color) -> FilterResult<()> {
        let dims = self.dimensions();
        if x >= dims.0 || y >= dims.1 {
            return Err(FilterError::out_of_bounds(x, y, dims));
        }
        self.buffer.put_pixel(x, y, color.to_rgba());
        Ok(())
    }
}

/// Writer for a single row of a [`RasterWriter`].
///
/// Rows are disjoint slices, so different rows can be filled concurrently.
#[derive(Debug)]
pub struct RowWriter<'a> {
    y: u32,
    width: u32,
    height: u32,
    samples: &'a mut [f32],
}

impl RowWriter<'_> {
    /// The row this writer owns.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Number of pixels in the row.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl PixelWriter for RowWriter<'_> {
    fn set(&mut self, x: u32, y: u32, color: Color) -> FilterResult<()> {
        if x >= self.width || y != self.y {
            return Err(FilterError::out_of_bounds(x, y, (self.width, self.height)));
        }
        let offset = x as usize * CHANNELS;
        let Rgba(channels) = color.to_rgba();
        self.samples[offset..offset + CHANNELS].copy_from_slice(&channels);
        Ok(())
    }
}
