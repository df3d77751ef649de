//! Cover geometry for a given blink progress.
//!
//! Coordinates use a top-left origin with y growing downwards. The macOS
//! renderer flips them into AppKit's bottom-left space before drawing.

use super::constants::{FALLBACK_SURFACE, PROGRESS_COVERED, PROGRESS_END};
use crate::clamp;

/// Pixel size of the overlay surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(FALLBACK_SURFACE.0, FALLBACK_SURFACE.1)
    }
}

/// The dark rectangle drawn over the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverRect {
    /// Left edge (always 0: the cover spans the full width).
    pub x: f64,
    /// Top edge (always 0: the cover hangs from the top of the surface).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CoverRect {
    /// Center of the rectangle, `(surface_width / 2, height / 2)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Share of the surface height the cover occupies.
    pub fn coverage(&self, surface: SurfaceSize) -> f64 {
        if surface.height <= 0.0 {
            0.0
        } else {
            self.height / surface.height
        }
    }

    pub fn is_empty(&self) -> bool {
        self.height <= 0.0 || self.width <= 0.0
    }
}

/// Fraction of the surface covered at `progress`.
///
/// Rises 0 → 1 over the descent, falls back 1 → 0 over the ascent.
pub fn coverage_fraction(progress: f64) -> f64 {
    let p = clamp(progress, 0.0, PROGRESS_END);
    if p <= PROGRESS_COVERED {
        p
    } else {
        PROGRESS_END - p
    }
}

/// Map blink progress to the cover rectangle.
///
/// For progress in [0, 1] the cover occupies the top `progress` of the
/// surface; for (1, 2] the top `2 - progress`. The rectangle is anchored to
/// the top edge and centered within its own height.
pub fn current_visual(progress: f64, surface: SurfaceSize) -> CoverRect {
    let fraction = coverage_fraction(progress);
    CoverRect {
        x: 0.0,
        y: 0.0,
        width: surface.width,
        height: surface.height * fraction,
    }
}
