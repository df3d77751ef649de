//! Event system for decoupled communication between components.
//!
//! Producers publish [`BlinkEvent`]s without knowing who handles them; the
//! bus delivers them synchronously to subscribers on the control thread.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐                ┌─────────────┐
//! │ Status bar  │                │  Scheduler  │
//! │    menu     │                │   timers    │
//! └──────┬──────┘                └──────┬──────┘
//!        │ IntervalChanged              │ TriggerBlink
//!        │ TriggerBlink                 │
//!        ▼                              ▼
//! ┌─────────────────────────────────────────────┐
//! │                  EventBus                   │
//! │        (synchronous, snapshot delivery)     │
//! └──────────┬───────────────────────┬──────────┘
//!            │ IntervalChanged       │ TriggerBlink
//!            ▼                       ▼
//!     ┌─────────────┐         ┌─────────────┐
//!     │  Scheduler  │         │  Animator   │
//!     └─────────────┘         └─────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`BlinkEvent`, `EventKind`)
//! - [`bus`]: `EventBus` and `EventPublisher`
//! - [`global`]: Thread-local process-wide bus

pub mod bus;
pub mod global;
pub mod types;

// Re-export main types for convenient access
pub use bus::{EventBus, EventPublisher, SubscriptionId};
pub use global::{bus, publish, subscribe, unsubscribe};
pub use types::{BlinkEvent, EventKind};
