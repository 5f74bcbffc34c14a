//! 3×3 sharpen convolution.
//!
//! Neighbors that fall outside the raster are skipped rather than padded, and
//! the kernel is not renormalized for the missing terms. Edge and corner
//! pixels therefore sum fewer negative weights than interior pixels and come
//! out brighter for the same input.

use crate::core::color::Color;
use crate::core::error::FilterResult;
use crate::core::raster::PixelReader;
use crate::filters::kind::FilterKind;
use crate::filters::registry::Filter;

/// A 3×3 weight matrix, `weights[i + 1][j + 1]` for offset `(i, j)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    weights: [[f32; 3]; 3],
}

impl Kernel3 {
    pub const fn new(weights: [[f32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Weight for the neighbor at offset `(dx, dy)`, each in `-1..=1`.
    fn weight(&self, dx: i32, dy: i32) -> f32 {
        self.weights[(dx + 1) as usize][(dy + 1) as usize]
    }

    /// Sum of all nine weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }

    /// Convolve at `(x, y)`, skipping out-of-bounds neighbors.
    ///
    /// Each color channel is clamped to [0, 1] after summation; alpha is
    /// copied from the center pixel.
    pub fn convolve_at(&self, source: &dyn PixelReader, x: u32, y: u32) -> FilterResult<Color> {
        let center = source.get(x, y)?;
        let mut sum = [0.0f32; 3];

        for dx in -1..=1 {
            for dy in -1..=1 {
                let (nx, ny) = (i64::from(x) + i64::from(dx), i64::from(y) + i64::from(dy));
                if !source.contains(nx, ny) {
                    continue;
                }
                let neighbor = source.get(nx as u32, ny as u32)?;
                let w = self.weight(dx, dy);
                sum[0] += neighbor.red() * w;
                sum[1] += neighbor.green() * w;
                sum[2] += neighbor.blue() * w;
            }
        }

        let [r, g, b] = sum.map(|v| v.clamp(0.0, 1.0));
        Ok(Color::rgba(r, g, b, center.alpha()))
    }
}

/// Center 1.8, every neighbor -0.1; weights sum to 1.
pub const SHARPEN_KERNEL: Kernel3 = Kernel3::new([
    [-0.1, -0.1, -0.1],
    [-0.1, 1.8, -0.1],
    [-0.1, -0.1, -0.1],
]);

/// The sharpen filter.
pub fn filter() -> Filter {
    Filter::new("Sharpen", FilterKind::Neighborhood(sharpen))
}

/// Sharpen rule for [`FilterKind::Neighborhood`].
pub fn sharpen(source: &dyn PixelReader, x: u32, y: u32) -> FilterResult<Color> {
    SHARPEN_KERNEL.convolve_at(source, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::Raster;
    use crate::filters::kind::apply_filter;

    const EPS: f32 = 1e-5;
    const GRAY: f32 = 0.5;

    fn gray(width: u32, height: u32) -> Raster {
        Raster::filled(width, height, Color::rgb(GRAY, GRAY, GRAY)).unwrap()
    }

    /// Expected output for a uniform gray pixel with `neighbors` in-bounds neighbors.
    fn expected(neighbors: u32) -> f32 {
        (1.8 * GRAY - 0.1 * GRAY * neighbors as f32).clamp(0.0, 1.0)
    }

    fn assert_channel(raster: &Raster, x: u32, y: u32, value: f32) {
        let c = raster.get(x, y).unwrap();
        assert!(
            c.approx_eq(&Color::rgb(value, value, value), EPS),
            "pixel ({}, {}) = {:?}, expected {}",
            x,
            y,
            c,
            value
        );
    }

    #[test]
    fn test_kernel_sums_to_one() {
        assert!((SHARPEN_KERNEL.sum() - 1.0).abs() < EPS);
        assert_eq!(SHARPEN_KERNEL.weight(0, 0), 1.8);
        assert_eq!(SHARPEN_KERNEL.weight(-1, 1), -0.1);
    }

    #[test]
    fn test_single_white_pixel() {
        let source = Raster::filled(1, 1, Color::WHITE).unwrap();
        let out = apply_filter(&source, &FilterKind::Neighborhood(sharpen)).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_single_pixel_uses_center_only() {
        let source = Raster::filled(1, 1, Color::rgb(0.25, 0.5, 0.1)).unwrap();
        let out = apply_filter(&source, &FilterKind::Neighborhood(sharpen)).unwrap();
        assert!(out
            .get(0, 0)
            .unwrap()
            .approx_eq(&Color::rgb(0.45, 0.9, 0.18), EPS));
    }

    #[test]
    fn test_interior_is_identity_on_uniform_image() {
        let out = apply_filter(&gray(3, 3), &FilterKind::Neighborhood(sharpen)).unwrap();
        assert_channel(&out, 1, 1, expected(8));
        assert!((expected(8) - GRAY).abs() < EPS);
    }

    #[test]
    fn test_all_four_corners_skip_five_neighbors() {
        let out = apply_filter(&gray(4, 3), &FilterKind::Neighborhood(sharpen)).unwrap();
        for (x, y) in [(0, 0), (3, 0), (0, 2), (3, 2)] {
            assert_channel(&out, x, y, expected(3));
        }
    }

    #[test]
    fn test_all_four_edges_skip_three_neighbors() {
        let out = apply_filter(&gray(4, 3), &FilterKind::Neighborhood(sharpen)).unwrap();
        // top, bottom, left, right
        for (x, y) in [(1, 0), (2, 2), (0, 1), (3, 1)] {
            assert_channel(&out, x, y, expected(5));
        }
        assert_channel(&out, 1, 1, expected(8));
        assert_channel(&out, 2, 1, expected(8));
    }

    #[test]
    fn test_single_row_and_column() {
        let row = apply_filter(&gray(3, 1), &FilterKind::Neighborhood(sharpen)).unwrap();
        assert_channel(&row, 0, 0, expected(1));
        assert_channel(&row, 1, 0, expected(2));
        assert_channel(&row, 2, 0, expected(1));

        let column = apply_filter(&gray(1, 3), &FilterKind::Neighborhood(sharpen)).unwrap();
        assert_channel(&column, 0, 0, expected(1));
        assert_channel(&column, 0, 1, expected(2));
    }

    #[test]
    fn test_bright_pixel_in_black_image_clamps() {
        let source = Raster::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Color::WHITE
            } else {
                Color::BLACK
            }
        })
        .unwrap();
        let out = apply_filter(&source, &FilterKind::Neighborhood(sharpen)).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), Color::WHITE);
        // Every neighbor sees -0.1 from the bright pixel and clamps to 0.
        assert_eq!(out.get(0, 0).unwrap(), Color::BLACK);
        assert_eq!(out.get(2, 1).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_alpha_from_center() {
        let source = Raster::from_fn(2, 1, |x, _| {
            Color::rgba(0.5, 0.5, 0.5, if x == 0 { 0.2 } else { 0.8 })
        })
        .unwrap();
        let out = apply_filter(&source, &FilterKind::Neighborhood(sharpen)).unwrap();
        assert!((out.get(0, 0).unwrap().alpha() - 0.2).abs() < EPS);
        assert!((out.get(1, 0).unwrap().alpha() - 0.8).abs() < EPS);
    }

    #[test]
    fn test_out_of_bounds_center_fails() {
        let source = gray(2, 2);
        assert!(sharpen(&source, 2, 0).is_err());
    }
}
