//! Process-wide access to the event bus.
//!
//! Hosts wire the app onto this bus so that code with no handle of its own
//! (AppKit callbacks, log tooling) can still reach it.
//!
//! # Design
//!
//! - The bus lives in a `thread_local!`: every access happens on the main
//!   (control) thread, and the bus itself is `!Send`
//! - It is created lazily on first use; `bus()` hands out another handle to
//!   the same instance
//!
//! # Example
//!
//! ```ignore
//! // In the status bar action:
//! events::publish(BlinkEvent::TriggerBlink);
//!
//! // When wiring the app:
//! let app = BlinkApp::new(config, &events::bus(), timers);
//! ```

use super::bus::{EventBus, SubscriptionId};
use super::types::{BlinkEvent, EventKind};

thread_local! {
    static BUS: EventBus = EventBus::new();
}

/// Handle to this thread's event bus.
pub fn bus() -> EventBus {
    BUS.with(|bus| bus.clone())
}

/// Publish an event on this thread's bus.
pub fn publish(event: BlinkEvent) {
    // Clone the handle out first so callbacks can reach the bus again
    bus().publish(event);
}

/// Subscribe on this thread's bus.
pub fn subscribe<F>(filter: Option<EventKind>, callback: F) -> SubscriptionId
where
    F: Fn(&BlinkEvent) + 'static,
{
    bus().subscribe(filter, callback)
}

/// Unsubscribe from this thread's bus.
pub fn unsubscribe(id: SubscriptionId) -> bool {
    bus().unsubscribe(id)
}
