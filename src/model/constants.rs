//! Configuration constants and default values.
//!
//! Timing defaults for the scheduler and animator, the interval choices the
//! menu offers, and the look of the cover layer.

use std::time::Duration;

// === Schedule Defaults ===

/// Default time between automatic blinks, in seconds (2 minutes).
pub const DEFAULT_INTERVAL_SECS: f64 = 120.0;

/// Intervals offered by the status bar menu, in seconds.
///
/// Any interval within [`MIN_INTERVAL_SECS`, `MAX_INTERVAL_SECS`] is accepted; this list only drives the menu.
pub const INTERVAL_CHOICES_SECS: [f64; 4] = [30.0, 60.0, 90.0, 120.0];

/// Shortest accepted interval, in seconds (1 ms).
///
/// Anything shorter would round to a zero-length timer period.
pub const MIN_INTERVAL_SECS: f64 = 0.001;

/// Longest accepted interval or startup delay, in seconds (365 days).
///
/// Keeps every deadline the timer queue computes well inside `Duration`.
pub const MAX_INTERVAL_SECS: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Delay of the one-shot startup blink, in seconds.
pub const DEFAULT_STARTUP_DELAY_SECS: f64 = 2.0;

// === Animation Defaults ===

/// Duration of each blink phase (descent, then ascent), in milliseconds.
pub const DEFAULT_BLINK_PHASE_MS: u64 = 150;

/// Frame period used while a blink is on screen (~60 FPS).
pub const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

/// Progress value when the cover is fully down.
pub const PROGRESS_COVERED: f64 = 1.0;

/// Progress value at the end of a full blink.
pub const PROGRESS_END: f64 = 2.0;

// === Visual Defaults ===

/// Default opacity of the black cover layer.
pub const DEFAULT_COVER_OPACITY: f64 = 0.8;

/// Minimum cover opacity.
pub const MIN_OPACITY: f64 = 0.0;

/// Maximum cover opacity.
pub const MAX_OPACITY: f64 = 1.0;

/// Fallback surface size when the host cannot query the screen.
pub const FALLBACK_SURFACE: (f64, f64) = (1920.0, 1080.0);
