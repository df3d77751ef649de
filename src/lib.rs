//! Blink scheduling core for the eyeblink menu bar app.
//!
//! Everything outside `platform` is pure Rust with no FFI, so the scheduler,
//! the animator and the event bus run as normal integration tests driven by
//! a manually advanced [`TimerQueue`].

pub mod app;
pub mod blink;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod model;
pub mod platform;
pub mod timer;

// Re-export the types hosts and tests reach for first
pub use app::{BlinkApp, CoverRenderer};
pub use blink::{
    BlinkAnimator, BlinkFrame, BlinkPhase, BlinkScheduler, ControlSurface, ScheduleState,
};
pub use config::BlinkConfig;
pub use error::{Error, Result};
pub use events::{BlinkEvent, EventBus, EventKind, EventPublisher, SubscriptionId};
pub use model::{current_visual, CoverRect, Interval, IntervalStore, SurfaceSize};
pub use timer::{TimerId, TimerQueue};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Ease-in-ease-out curve on [0, 1] (cubic smoothstep).
///
/// Accelerates from rest, decelerates into the end. Input outside [0, 1] is
/// clamped first, so `ease_in_out(0.0) == 0.0` and `ease_in_out(1.0) == 1.0`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
