//! Events carried by the bus.
//!
//! Producers (scheduler timers, the status bar menu) publish these; the
//! animator and the scheduler consume them. Pure Rust, no FFI.

use crate::model::Interval;

/// Application-level events for decoupled communication between components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlinkEvent {
    /// Run one blink now (ignored if one is already on screen)
    TriggerBlink,

    /// The user picked a new interval; the periodic timer restarts with it
    IntervalChanged { interval: Interval },
}

/// Event discriminant used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TriggerBlink,
    IntervalChanged,
}

impl BlinkEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BlinkEvent::TriggerBlink => EventKind::TriggerBlink,
            BlinkEvent::IntervalChanged { .. } => EventKind::IntervalChanged,
        }
    }

    /// Returns a human-readable description of the event for logging.
    pub fn description(&self) -> &'static str {
        match self {
            BlinkEvent::TriggerBlink => "Trigger blink",
            BlinkEvent::IntervalChanged { .. } => "Blink interval changed",
        }
    }
}
