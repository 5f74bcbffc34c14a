//! Filter kinds and the single dispatch point that applies them.
//!
//! A filter is either a pure per-pixel color map or a neighborhood rule that
//! may look at any source pixel when computing one destination pixel. Both
//! are plain function pointers, so a filter cannot carry mutable state and
//! can be shared freely across threads.

use crate::core::color::Color;
use crate::core::config::{ProcessingConfig, DEFAULT_MIN_PARALLEL_PIXELS};
use crate::core::error::{FilterError, FilterResult};
use crate::core::raster::{PixelReader, PixelWriter, Raster, RasterWriter};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pure per-pixel color transform.
pub type ColorMap = fn(Color) -> Color;

/// Computes the destination color at `(x, y)` from the whole source.
pub type NeighborhoodFn = fn(&dyn PixelReader, u32, u32) -> FilterResult<Color>;

/// How a filter computes its output.
#[derive(Clone, Copy)]
pub enum FilterKind {
    /// `dest[x, y] = map(source[x, y])`.
    Pointwise(ColorMap),
    /// `dest[x, y] = rule(source, x, y)`.
    Neighborhood(NeighborhoodFn),
}

/// Serializable tag for a [`FilterKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    Pointwise,
    Neighborhood,
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindTag::Pointwise => write!(f, "pointwise"),
            KindTag::Neighborhood => write!(f, "neighborhood"),
        }
    }
}

impl FilterKind {
    /// The variant without its function.
    pub fn tag(&self) -> KindTag {
        match self {
            FilterKind::Pointwise(_) => KindTag::Pointwise,
            FilterKind::Neighborhood(_) => KindTag::Neighborhood,
        }
    }

    /// The color map of a pointwise filter.
    pub fn color_map(&self) -> Option<ColorMap> {
        match self {
            FilterKind::Pointwise(map) => Some(*map),
            FilterKind::Neighborhood(_) => None,
        }
    }

    /// Destination color at `(x, y)`.
    pub fn compute(&self, source: &dyn PixelReader, x: u32, y: u32) -> FilterResult<Color> {
        match self {
            FilterKind::Pointwise(map) => source.get(x, y).map(*map),
            FilterKind::Neighborhood(rule) => rule(source, x, y),
        }
    }
}

impl fmt::Debug for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterKind").field(&self.tag()).finish()
    }
}

/// Execution options for [`apply_filter_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Whether rows may be filled on the rayon pool.
    pub parallel: bool,
    /// Rasters smaller than this are always filled sequentially.
    pub min_parallel_pixels: usize,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_pixels: DEFAULT_MIN_PARALLEL_PIXELS,
        }
    }
}

impl ApplyOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that never leave the calling thread.
    pub fn sequential() -> Self {
        Self::default().with_parallel(false)
    }

    /// Enable/disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the parallel threshold.
    pub fn with_min_parallel_pixels(mut self, pixels: usize) -> Self {
        self.min_parallel_pixels = pixels;
        self
    }

    fn use_parallel(&self, width: u32, height: u32) -> bool {
        self.parallel && width as usize * height as usize >= self.min_parallel_pixels
    }
}

impl From<&ProcessingConfig> for ApplyOptions {
    fn from(config: &ProcessingConfig) -> Self {
        Self {
            parallel: config.parallel,
            min_parallel_pixels: config.min_parallel_pixels,
        }
    }
}

/// Apply `kind` to `source` with default options.
pub fn apply_filter(source: &Raster, kind: &FilterKind) -> FilterResult<Raster> {
    apply_filter_with(source, kind, &ApplyOptions::default())
}

/// Apply `kind` to `source`, returning a new raster of the same size.
pub fn apply_filter_with(
    source: &Raster,
    kind: &FilterKind,
    options: &ApplyOptions,
) -> FilterResult<Raster> {
    let mut dest = RasterWriter::matching(source)?;
    apply_into(source, kind, &mut dest, options)?;
    Ok(dest.finish())
}

/// Apply `kind` to `source`, writing every pixel of `dest`.
///
/// Fails with `DimensionMismatch` before any pixel is computed when `dest`
/// does not have the size of `source`.
pub fn apply_into(
    source: &Raster,
    kind: &FilterKind,
    dest: &mut RasterWriter,
    options: &ApplyOptions,
) -> FilterResult<()> {
    let expected = source.dimensions();
    let actual = dest.dimensions();
    if expected != actual {
        return Err(FilterError::DimensionMismatch { expected, actual });
    }

    let (width, _) = expected;
    if options.use_parallel(expected.0, expected.1) {
        dest.par_rows_mut().try_for_each(|mut row| {
            let y = row.y();
            (0..width).try_for_each(|x| row.set(x, y, kind.compute(source, x, y)?))
        })
    } else {
        for mut row in dest.rows_mut() {
            let y = row.y();
            for x in 0..width {
                row.set(x, y, kind.compute(source, x, y)?)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Raster {
        Raster::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Color::rgb(0.9, 0.1, 0.3)
            } else {
                Color::rgb(0.2, 0.7, 0.5)
            }
        })
        .unwrap()
    }

    fn swap_red_blue(c: Color) -> Color {
        Color::rgba(c.blue(), c.green(), c.red(), c.alpha())
    }

    fn copy_left(source: &dyn PixelReader, x: u32, y: u32) -> FilterResult<Color> {
        source.get(x.saturating_sub(1), y)
    }

    #[test]
    fn test_pointwise_dispatch() {
        let source = checker(3, 2);
        let out = apply_filter(&source, &FilterKind::Pointwise(swap_red_blue)).unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.get(0, 0).unwrap(), Color::rgb(0.3, 0.1, 0.9));
    }

    #[test]
    fn test_neighborhood_dispatch() {
        let source = checker(3, 1);
        let out = apply_filter(&source, &FilterKind::Neighborhood(copy_left)).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), source.get(0, 0).unwrap());
        assert_eq!(out.get(1, 0).unwrap(), source.get(0, 0).unwrap());
        assert_eq!(out.get(2, 0).unwrap(), source.get(1, 0).unwrap());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let source = checker(3, 2);
        let mut dest = RasterWriter::new(2, 3).unwrap();
        let err = apply_into(
            &source,
            &FilterKind::Pointwise(swap_red_blue),
            &mut dest,
            &ApplyOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FilterError::DimensionMismatch {
                expected: (3, 2),
                actual: (2, 3)
            }
        );
        assert!(err.is_programming_error());
    }

    #[test]
    fn test_rule_errors_propagate() {
        fn out_of_range(source: &dyn PixelReader, x: u32, y: u32) -> FilterResult<Color> {
            source.get(x + 10, y)
        }
        let source = checker(2, 2);
        let kind = FilterKind::Neighborhood(out_of_range);
        assert!(matches!(
            apply_filter_with(&source, &kind, &ApplyOptions::sequential()),
            Err(FilterError::OutOfBounds { .. })
        ));
        let parallel = ApplyOptions::new().with_min_parallel_pixels(0);
        assert!(apply_filter_with(&source, &kind, &parallel).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = checker(17, 9);
        let kind = FilterKind::Neighborhood(copy_left);
        let sequential = apply_filter_with(&source, &kind, &ApplyOptions::sequential()).unwrap();
        let parallel = apply_filter_with(
            &source,
            &kind,
            &ApplyOptions::new().with_min_parallel_pixels(1),
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_options_from_config() {
        let config = ProcessingConfig {
            parallel: false,
            min_parallel_pixels: 10,
        };
        let options = ApplyOptions::from(&config);
        assert!(!options.parallel);
        assert!(!options.use_parallel(100, 100));
        assert!(ApplyOptions::new().with_min_parallel_pixels(10).use_parallel(5, 2));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(FilterKind::Pointwise(swap_red_blue).tag(), KindTag::Pointwise);
        assert!(FilterKind::Neighborhood(copy_left).color_map().is_none());
        assert_eq!(KindTag::Neighborhood.to_string(), "neighborhood");
    }
}
