//! Synchronous publish/subscribe bus.
//!
//! - `publish()` calls every registered subscriber right away, in
//!   subscription order, on the calling thread
//! - Delivery walks a snapshot of the subscriber list, so callbacks may
//!   subscribe, unsubscribe or publish while an event is being delivered
//! - Nothing is queued: an event published with no subscribers is dropped,
//!   and a late subscriber never sees earlier events
//!
//! The bus is built on `Rc`/`RefCell` and is deliberately `!Send`; all
//! publishing happens on the one control thread.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::types::{BlinkEvent, EventKind};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn(&BlinkEvent)>;

struct Subscriber {
    id: SubscriptionId,
    filter: Option<EventKind>,
    callback: Callback,
    /// Cleared on unsubscribe so an in-flight snapshot skips it
    active: Rc<Cell<bool>>,
}

#[derive(Default)]
struct BusInner {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

/// Event bus shared by every component on the control thread.
///
/// Cloning is cheap and yields another handle to the same bus.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use eyeblink::events::{BlinkEvent, EventBus, EventKind};
///
/// let bus = EventBus::new();
/// let seen = Rc::new(Cell::new(0));
/// let counter = seen.clone();
/// bus.subscribe(Some(EventKind::TriggerBlink), move |_| counter.set(counter.get() + 1));
///
/// bus.publish(BlinkEvent::TriggerBlink);
/// assert_eq!(seen.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a publisher handle for producers.
    ///
    /// Publishers do not keep the bus alive.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Register `callback` for events of `filter` kind, or all events if `None`.
    pub fn subscribe<F>(&self, filter: Option<EventKind>, callback: F) -> SubscriptionId
    where
        F: Fn(&BlinkEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push(Subscriber {
            id,
            filter,
            callback: Rc::new(callback),
            active: Rc::new(Cell::new(true)),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    ///
    /// Safe to call from inside a callback: the removed subscriber will not
    /// be called for the rest of the current delivery.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.subscribers.iter().position(|s| s.id == id) {
            Some(pos) => {
                let removed = inner.subscribers.remove(pos);
                removed.active.set(false);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every current subscriber whose filter matches.
    pub fn publish(&self, event: BlinkEvent) {
        deliver(&self.inner, event);
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

fn deliver(inner: &RefCell<BusInner>, event: BlinkEvent) {
    let kind = event.kind();
    // Snapshot, then release the borrow before calling out
    let targets: Vec<(Callback, Rc<Cell<bool>>)> = inner
        .borrow()
        .subscribers
        .iter()
        .filter(|s| s.filter.map_or(true, |k| k == kind))
        .map(|s| (s.callback.clone(), s.active.clone()))
        .collect();

    if targets.is_empty() {
        trace!(?event, "no subscribers, event dropped");
        return;
    }

    for (callback, active) in targets {
        if active.get() {
            callback(&event);
        }
    }
}

/// A cloneable publisher handle.
///
/// Holds a weak reference: once the bus is gone, publishing is a silent
/// no-op (the app is shutting down).
#[derive(Clone)]
pub struct EventPublisher {
    bus: Weak<RefCell<BusInner>>,
}

impl EventPublisher {
    /// Publish an event to the bus.
    pub fn publish(&self, event: BlinkEvent) {
        if let Some(inner) = self.bus.upgrade() {
            deliver(&inner, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Interval;

    fn recorder(bus: &EventBus, filter: Option<EventKind>) -> Rc<RefCell<Vec<BlinkEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        bus.subscribe(filter, move |e| sink.borrow_mut().push(*e));
        log
    }

    #[test]
    fn test_create_bus() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers_is_dropped() {
        let bus = EventBus::new();
        bus.publish(BlinkEvent::TriggerBlink);
        let log = recorder(&bus, None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_delivery_is_synchronous() {
        let bus = EventBus::new();
        let log = recorder(&bus, None);
        bus.publish(BlinkEvent::TriggerBlink);
        assert_eq!(*log.borrow(), vec![BlinkEvent::TriggerBlink]);
    }

    #[test]
    fn test_subscription_order_is_delivery_order() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            bus.subscribe(None, move |_| order.borrow_mut().push(n));
        }
        bus.publish(BlinkEvent::TriggerBlink);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_by_kind() {
        let bus = EventBus::new();
        let triggers = recorder(&bus, Some(EventKind::TriggerBlink));
        let changes = recorder(&bus, Some(EventKind::IntervalChanged));

        bus.publish(BlinkEvent::TriggerBlink);
        bus.publish(BlinkEvent::IntervalChanged {
            interval: Interval::default(),
        });

        assert_eq!(triggers.borrow().len(), 1);
        assert_eq!(changes.borrow().len(), 1);
        assert_eq!(changes.borrow()[0].kind(), EventKind::IntervalChanged);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let id = bus.subscribe(None, move |e| sink.borrow_mut().push(*e));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(BlinkEvent::TriggerBlink);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_during_delivery_skips_later_subscriber() {
        let bus = EventBus::new();
        let later_id = Rc::new(Cell::new(None));

        let handle = bus.clone();
        let target = later_id.clone();
        bus.subscribe(None, move |_| {
            if let Some(id) = target.get() {
                handle.unsubscribe(id);
            }
        });
        let log = recorder(&bus, None);
        // The recorder is the second subscriber; its id is 1
        later_id.set(Some(SubscriptionId(1)));

        bus.publish(BlinkEvent::TriggerBlink);
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[test]
    fn test_subscribe_during_delivery_misses_current_event() {
        let bus = EventBus::new();
        let late = Rc::new(RefCell::new(None));

        let handle = bus.clone();
        let slot = late.clone();
        bus.subscribe(None, move |_| {
            if slot.borrow().is_none() {
                *slot.borrow_mut() = Some(recorder(&handle, None));
            }
        });

        bus.publish(BlinkEvent::TriggerBlink);
        let late_log = late.borrow().clone().unwrap();
        assert!(late_log.borrow().is_empty());

        bus.publish(BlinkEvent::TriggerBlink);
        assert_eq!(late_log.borrow().len(), 1);
    }

    #[test]
    fn test_publish_from_inside_a_callback() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        bus.subscribe(Some(EventKind::IntervalChanged), move |_| {
            publisher.publish(BlinkEvent::TriggerBlink)
        });
        let triggers = recorder(&bus, Some(EventKind::TriggerBlink));

        bus.publish(BlinkEvent::IntervalChanged {
            interval: Interval::default(),
        });
        assert_eq!(triggers.borrow().len(), 1);
    }

    #[test]
    fn test_publisher_after_bus_dropped_is_noop() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        drop(bus);
        publisher.publish(BlinkEvent::TriggerBlink);
    }

    #[test]
    fn test_publisher_clone_reaches_same_bus() {
        let bus = EventBus::new();
        let log = recorder(&bus, None);
        let pub1 = bus.publisher();
        let pub2 = pub1.clone();

        pub1.publish(BlinkEvent::TriggerBlink);
        pub2.publish(BlinkEvent::TriggerBlink);
        assert_eq!(log.borrow().len(), 2);
    }
}
