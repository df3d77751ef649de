//! Commands behind the status bar menu.
//!
//! The control surface validates user input, keeps the [`IntervalStore`]
//! that drives the menu checkmarks, and publishes events. It holds no
//! reference to the scheduler or the animator.

use tracing::{info, warn};

use crate::error::Result;
use crate::events::{BlinkEvent, EventPublisher};
use crate::model::{Interval, IntervalChoice, IntervalStore};

pub struct ControlSurface {
    store: IntervalStore,
    publisher: EventPublisher,
}

impl ControlSurface {
    pub fn new(initial: Interval, publisher: EventPublisher) -> Self {
        Self {
            store: IntervalStore::new(initial),
            publisher,
        }
    }

    /// Pick a new blink interval, in seconds.
    ///
    /// Rejects non-positive and non-finite values before anything is
    /// published. Re-selecting the current interval still publishes, which
    /// restarts the schedule from now (matches picking the checked item).
    pub fn select_interval(&mut self, secs: f64) -> Result<()> {
        let interval = Interval::from_secs(secs).inspect_err(|err| {
            warn!(%err, "interval selection rejected");
        })?;
        self.store.set(interval);
        info!(%interval, "blink interval selected");
        self.publisher.publish(BlinkEvent::IntervalChanged { interval });
        Ok(())
    }

    /// Blink right away, outside the schedule.
    pub fn trigger_now(&self) {
        info!("manual blink requested");
        self.publisher.publish(BlinkEvent::TriggerBlink);
    }

    pub fn current_interval(&self) -> Interval {
        self.store.current()
    }

    /// Rows for the interval submenu.
    pub fn interval_choices(&self) -> Vec<IntervalChoice> {
        self.store.choices()
    }
}
