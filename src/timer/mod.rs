//! Timer service for the scheduler and the animator.
//!
//! One queue per control thread. Hosts drive it from their own clock.

pub mod queue;

pub use queue::{TimerId, TimerQueue};
