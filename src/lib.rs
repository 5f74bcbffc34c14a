//! # Pixelworks - Raster Filters and Basic Editing
//!
//! Pixelworks applies whole-image color filters to in-memory rasters and
//! provides the small set of edits a simple photo editor needs.
//!
//! ## Features
//!
//! - **Pointwise filters**: invert, grayscale, saturate, black and white,
//!   channel forcing and sepia, each a pure function of one pixel
//! - **Neighborhood filters**: a 3×3 sharpen convolution
//! - **Parallel rows**: large rasters are filled row by row on the rayon pool
//! - **Editing**: quarter-turn rotation, cropping and a freehand overlay
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pixelworks::prelude::*;
//!
//! let registry = FilterRegistry::with_builtins();
//! let source = pixelworks::io::load_raster("input.png")?;
//! let sepia = registry.apply("Sepia", &source, &ApplyOptions::default())?;
//! pixelworks::io::save_raster(&sepia, "output.jpg", &OutputConfig::default())?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: colors, rasters, errors and configuration
//! - [`filters`]: the filter engine, registry and built-in filters
//! - [`edit`]: rotation, cropping and the stroke overlay
//! - [`io`]: reading and writing image files
//! - [`session`]: the stateful editing session used by the CLI

#![warn(clippy::all)]

pub mod core;
pub mod edit;
pub mod filters;
pub mod io;
pub mod session;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pixelworks::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::color::Color;
    pub use crate::core::raster::{PixelReader, PixelWriter, Raster, RasterWriter};

    // Configuration
    pub use crate::core::config::{EditorConfig, OutputConfig, OverlayConfig, ProcessingConfig};

    // Errors
    pub use crate::core::error::{
        EditError, FilterError, FilterResult, PixelworksError, PixelworksResult, RegistryError,
    };

    // Filters
    pub use crate::filters::kind::{
        apply_filter, apply_filter_with, apply_into, ApplyOptions, FilterKind, KindTag,
    };
    pub use crate::filters::registry::{Filter, FilterDescriptor, FilterRegistry};

    // Editing
    pub use crate::edit::overlay::{Overlay, Stroke};
    pub use crate::edit::transform::{crop, rotate_left, rotate_right, CropRect};
    pub use crate::session::EditSession;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::filters::builtin;
    use proptest::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "pixelworks");
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = FilterRegistry::with_builtins();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "Invert",
                "Grayscale",
                "Saturate",
                "Black and White",
                "Red",
                "Green",
                "Blue",
                "Sepia",
                "Sharpen"
            ]
        );
    }

    #[test]
    fn test_red_scenario() {
        let source = Raster::filled(2, 2, Color::rgb(0.2, 0.4, 0.6)).unwrap();
        let out = FilterRegistry::with_builtins()
            .apply("Red", &source, &ApplyOptions::default())
            .unwrap();
        for (_, _, c) in out.pixels() {
            assert!(c.approx_eq(&Color::rgb(1.0, 0.4, 0.6), 1e-6));
        }
    }

    fn arb_raster() -> impl Strategy<Value = Raster> {
        (1u32..7, 1u32..7).prop_flat_map(|(w, h)| {
            prop::collection::vec(0.0f32..=1.0, (w * h * 4) as usize)
                .prop_map(move |samples| Raster::from_raw(w, h, samples).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_filters_preserve_dimensions_and_source(source in arb_raster()) {
            let before = source.clone();
            for filter in builtin::all() {
                let out = filter.apply(&source).unwrap();
                prop_assert_eq!(out.dimensions(), source.dimensions());
                prop_assert_eq!(&source, &before);
            }
        }

        #[test]
        fn prop_pointwise_filters_see_one_pixel(source in arb_raster()) {
            for filter in builtin::all() {
                let Some(map) = filter.kind().color_map() else { continue };
                let out = filter.apply(&source).unwrap();
                for (x, y, c) in source.pixels() {
                    prop_assert_eq!(out.get(x, y).unwrap(), map(c));
                }
            }
        }

        #[test]
        fn prop_sepia_and_sharpen_stay_in_range(source in arb_raster()) {
            let registry = FilterRegistry::with_builtins();
            for name in ["Sepia", "Sharpen"] {
                let out = registry.apply(name, &source, &ApplyOptions::default()).unwrap();
                for v in out.samples() {
                    prop_assert!((0.0..=1.0).contains(v));
                }
            }
        }

        #[test]
        fn prop_invert_twice_is_identity(source in arb_raster()) {
            let invert = FilterKind::Pointwise(builtin::invert);
            let twice = apply_filter(&apply_filter(&source, &invert).unwrap(), &invert).unwrap();
            for (x, y, c) in source.pixels() {
                prop_assert!(twice.get(x, y).unwrap().approx_eq(&c, 1e-6));
            }
        }

        #[test]
        fn prop_parallel_matches_sequential(source in arb_raster()) {
            let parallel = ApplyOptions::new().with_min_parallel_pixels(0);
            for filter in builtin::all() {
                let a = filter.apply_with(&source, &parallel).unwrap();
                let b = filter.apply_with(&source, &ApplyOptions::sequential()).unwrap();
                prop_assert_eq!(a, b);
            }
        }
    }
}
