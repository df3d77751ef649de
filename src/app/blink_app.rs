//! Wiring of the blink core.
//!
//! `BlinkApp` builds the scheduler, the animator and the control surface on
//! one bus and one timer queue, in that order, and gives hosts a small API:
//! advance time, read the frame to draw, forward menu commands.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::info;

use crate::blink::{BlinkAnimator, BlinkFrame, BlinkScheduler, ControlSurface, ScheduleState};
use crate::config::BlinkConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::model::{CoverRect, Interval, IntervalChoice, SurfaceSize, FRAME_PERIOD};
use crate::timer::TimerQueue;

/// Draws the cover layer. Implemented by each host.
pub trait CoverRenderer {
    /// Draw `cover` as a black layer with `opacity`.
    fn draw(&mut self, frame: BlinkFrame, cover: CoverRect, opacity: f64);

    /// Nothing to show (no blink in flight).
    fn clear(&mut self);
}

pub struct BlinkApp {
    config: BlinkConfig,
    bus: EventBus,
    timers: TimerQueue,
    scheduler: Rc<RefCell<BlinkScheduler>>,
    animator: Rc<RefCell<BlinkAnimator>>,
    control: ControlSurface,
}

impl BlinkApp {
    /// Wire the components on `bus`. Nothing is scheduled until `start()`.
    pub fn new(config: BlinkConfig, bus: &EventBus, timers: TimerQueue) -> Self {
        let scheduler = BlinkScheduler::attach(
            bus,
            config.interval,
            config.startup_delay,
            timers.clone(),
        );
        let animator = BlinkAnimator::attach(bus, config.phase_duration, timers.clone());
        let control = ControlSurface::new(config.interval, bus.publisher());

        Self {
            config,
            bus: bus.clone(),
            timers,
            scheduler,
            animator,
            control,
        }
    }

    /// Start the periodic schedule (and the startup blink).
    pub fn start(&self) {
        info!(
            interval = %self.config.interval,
            phase_ms = self.config.phase_duration.as_millis() as u64,
            "starting blink app"
        );
        self.scheduler.borrow_mut().start();
    }

    /// Stop the schedule and leave the bus.
    pub fn shutdown(&self) {
        self.scheduler.borrow_mut().stop();
        let subscriptions = [
            self.scheduler.borrow().subscription(),
            self.animator.borrow().subscription(),
        ];
        for id in subscriptions.into_iter().flatten() {
            self.bus.unsubscribe(id);
        }
    }

    /// Menu: pick a new interval in seconds.
    pub fn select_interval(&mut self, secs: f64) -> Result<()> {
        self.control.select_interval(secs)
    }

    /// Menu: blink now.
    pub fn trigger_now(&self) {
        self.control.trigger_now();
    }

    /// Move virtual time to `now`, firing due timers.
    pub fn advance_to(&self, now: Duration) -> usize {
        self.timers.advance_to(now)
    }

    /// Frame at the current virtual time.
    pub fn frame(&self) -> BlinkFrame {
        self.animator.borrow().frame_at(self.timers.now())
    }

    /// Render the current frame on a surface of `surface` size.
    ///
    /// Returns whether a cover was drawn.
    pub fn render(&self, renderer: &mut dyn CoverRenderer, surface: SurfaceSize) -> bool {
        let frame = self.frame();
        if frame.is_visible() {
            renderer.draw(frame, frame.cover(surface), self.config.cover_opacity);
            true
        } else {
            renderer.clear();
            false
        }
    }

    /// Virtual time at which the host should wake up next.
    ///
    /// One frame ahead while a blink is running, otherwise the next timer.
    pub fn next_wakeup(&self) -> Option<Duration> {
        let next_timer = self.timers.next_deadline();
        if self.is_blinking() {
            let next_frame = self.timers.now() + FRAME_PERIOD;
            Some(next_timer.map_or(next_frame, |t| t.min(next_frame)))
        } else {
            next_timer
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.animator.borrow().is_blinking()
    }

    pub fn blinks_completed(&self) -> u64 {
        self.animator.borrow().blinks_completed()
    }

    pub fn schedule_state(&self) -> ScheduleState {
        self.scheduler.borrow().state()
    }

    pub fn current_interval(&self) -> Interval {
        self.control.current_interval()
    }

    pub fn interval_choices(&self) -> Vec<IntervalChoice> {
        self.control.interval_choices()
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::BlinkPhase;

    #[derive(Default)]
    struct Recorder {
        drawn: Vec<CoverRect>,
        clears: usize,
    }

    impl CoverRenderer for Recorder {
        fn draw(&mut self, _frame: BlinkFrame, cover: CoverRect, _opacity: f64) {
            self.drawn.push(cover);
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    fn app() -> BlinkApp {
        BlinkApp::new(BlinkConfig::default(), &EventBus::new(), TimerQueue::new())
    }

    #[test]
    fn new_app_is_idle_and_unscheduled() {
        let app = app();
        assert_eq!(app.schedule_state(), ScheduleState::Uninitialized);
        assert_eq!(app.next_wakeup(), None);
        assert_eq!(app.frame().phase, BlinkPhase::Idle);
    }

    #[test]
    fn render_draws_only_while_blinking() {
        let app = app();
        let mut r = Recorder::default();
        let surface = SurfaceSize::new(100.0, 100.0);

        assert!(!app.render(&mut r, surface));
        app.trigger_now();
        app.advance_to(Duration::from_millis(150));
        assert!(app.render(&mut r, surface));
        let full = CoverRect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        };
        assert_eq!(r.drawn, vec![full]);
        assert_eq!(r.clears, 1);
    }

    #[test]
    fn next_wakeup_tracks_frames_during_a_blink() {
        let app = app();
        app.start();
        assert_eq!(app.next_wakeup(), Some(Duration::from_secs(2)));

        app.trigger_now();
        assert_eq!(app.next_wakeup(), Some(FRAME_PERIOD));
    }

    #[test]
    fn shutdown_stops_schedule_and_unsubscribes() {
        let app = app();
        app.start();
        app.shutdown();
        assert_eq!(app.schedule_state(), ScheduleState::Stopped);
        assert_eq!(app.bus().subscriber_count(), 0);
        app.trigger_now();
        assert!(!app.is_blinking());
    }
}
