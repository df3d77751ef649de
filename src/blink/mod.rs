//! Blink scheduling and animation.
//!
//! - [`scheduler`]: periodic timer that publishes `TriggerBlink`
//! - [`animator`]: single-flight Idle → Descending → Ascending machine
//! - [`control`]: user-facing commands (pick interval, blink now)

pub mod animator;
pub mod control;
pub mod scheduler;

pub use animator::{BlinkAnimator, BlinkFrame, BlinkPhase};
pub use control::ControlSurface;
pub use scheduler::{BlinkScheduler, ScheduleState};
