//! Filter module.
//!
//! Contains the filter kinds and their dispatch, the filter registry and the
//! built-in filter implementations.

pub mod builtin;
pub mod kind;
pub mod registry;

pub use kind::{
    apply_filter, apply_filter_with, apply_into, ApplyOptions, ColorMap, FilterKind, KindTag,
    NeighborhoodFn,
};
pub use registry::{Filter, FilterDescriptor, FilterRegistry};
