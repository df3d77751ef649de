//! Periodic blink scheduling.
//!
//! The scheduler owns the repeating timer and the interval it runs at. It
//! publishes `TriggerBlink` on every tick and rebuilds the timer when it sees
//! `IntervalChanged`. It never talks to the animator directly.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::events::{BlinkEvent, EventBus, EventKind, EventPublisher, SubscriptionId};
use crate::model::Interval;
use crate::timer::{TimerId, TimerQueue};

/// Lifecycle of the periodic schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleState {
    /// Created, not started yet
    Uninitialized,
    /// Periodic timer installed
    Running { interval: Interval, timer: TimerId },
    /// Shut down; never restarts
    Stopped,
}

/// Owns the periodic blink timer.
pub struct BlinkScheduler {
    state: ScheduleState,
    /// Interval to use on the next (re)start; single owner of this value
    interval: Interval,
    startup_delay: Option<Duration>,
    startup_timer: Option<TimerId>,
    timers: TimerQueue,
    publisher: EventPublisher,
    subscription: Option<SubscriptionId>,
}

impl BlinkScheduler {
    /// Create a scheduler that publishes through `publisher`.
    ///
    /// `startup_delay` schedules the one-shot self-test blink on `start()`;
    /// `None` disables it.
    pub fn new(
        interval: Interval,
        startup_delay: Option<Duration>,
        timers: TimerQueue,
        publisher: EventPublisher,
    ) -> Self {
        Self {
            state: ScheduleState::Uninitialized,
            interval,
            startup_delay,
            startup_timer: None,
            timers,
            publisher,
            subscription: None,
        }
    }

    /// Create a scheduler and subscribe it to `IntervalChanged` on `bus`.
    pub fn attach(
        bus: &EventBus,
        interval: Interval,
        startup_delay: Option<Duration>,
        timers: TimerQueue,
    ) -> Rc<RefCell<Self>> {
        let scheduler = Rc::new(RefCell::new(Self::new(
            interval,
            startup_delay,
            timers,
            bus.publisher(),
        )));

        let weak = Rc::downgrade(&scheduler);
        let id = bus.subscribe(Some(EventKind::IntervalChanged), move |event| {
            if let (Some(scheduler), BlinkEvent::IntervalChanged { interval }) =
                (weak.upgrade(), event)
            {
                scheduler.borrow_mut().on_interval_changed(*interval);
            }
        });
        scheduler.borrow_mut().subscription = Some(id);
        scheduler
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Interval in effect (or to be used by `start()`).
    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ScheduleState::Running { .. })
    }

    /// Bus subscription made by [`BlinkScheduler::attach`].
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Uninitialized → Running. Also arms the startup self-test blink.
    pub fn start(&mut self) {
        if self.state != ScheduleState::Uninitialized {
            debug!(state = ?self.state, "scheduler start ignored");
            return;
        }

        if let Some(delay) = self.startup_delay {
            let publisher = self.publisher.clone();
            let id = self.timers.schedule_once(delay, move || {
                debug!("startup blink");
                publisher.publish(BlinkEvent::TriggerBlink);
            });
            self.startup_timer = Some(id);
        }

        let timer = self.install_periodic();
        self.state = ScheduleState::Running {
            interval: self.interval,
            timer,
        };
        info!(interval = %self.interval, "blink schedule started");
    }

    /// Restart the periodic timer with `interval`, phase counted from now.
    ///
    /// `Interval` is range-checked when built, so any value that gets here is
    /// usable as a timer period.
    pub fn on_interval_changed(&mut self, interval: Interval) {
        debug_assert!(
            interval.as_duration() > Duration::ZERO,
            "scheduler received a zero-length interval"
        );
        match self.state {
            ScheduleState::Uninitialized => {
                self.interval = interval;
                debug!(%interval, "interval recorded before start");
            }
            ScheduleState::Running { timer, .. } => {
                self.timers.cancel(timer);
                self.interval = interval;
                let timer = self.install_periodic();
                self.state = ScheduleState::Running { interval, timer };
                info!(%interval, "blink schedule restarted");
            }
            ScheduleState::Stopped => {
                debug!(%interval, "interval change after stop ignored");
            }
        }
    }

    /// Cancel every live timer and move to Stopped.
    pub fn stop(&mut self) {
        if let ScheduleState::Running { timer, .. } = self.state {
            self.timers.cancel(timer);
        }
        if let Some(id) = self.startup_timer.take() {
            self.timers.cancel(id);
        }
        if self.state != ScheduleState::Stopped {
            info!("blink schedule stopped");
        }
        self.state = ScheduleState::Stopped;
    }

    fn install_periodic(&self) -> TimerId {
        let publisher = self.publisher.clone();
        let id = self
            .timers
            .schedule_repeating(self.interval.as_duration(), move || {
                debug!("periodic blink");
                publisher.publish(BlinkEvent::TriggerBlink);
            });
        debug!(interval = %self.interval, ?id, "periodic timer installed");
        id
    }
}
