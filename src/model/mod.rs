//! Application domain model.
//!
//! Pure values with no FFI: the interval type and its store, the cover
//! geometry, and the timing/visual constants.

pub mod constants;
pub mod geometry;
pub mod interval;
pub mod interval_store;

pub use constants::*;
pub use geometry::{coverage_fraction, current_visual, CoverRect, SurfaceSize};
pub use interval::Interval;
pub use interval_store::{IntervalChoice, IntervalStore};
