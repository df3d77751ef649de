//! Blink animation state machine.
//!
//! ```text
//!          TriggerBlink                after D                 after D
//!   Idle ───────────────▶ Descending ─────────▶ Ascending ─────────▶ Idle
//!    ▲                    progress 0→1           progress 1→2       progress 0
//!    └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Triggers that arrive outside `Idle` are dropped, so at most one blink is
//! ever on screen. A started blink always runs to completion.
//!
//! Progress is not pushed anywhere: the renderer samples it with
//! [`BlinkAnimator::frame_at`] whenever it draws, which gives a smooth sweep
//! at whatever frame rate the host runs.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use crate::ease_in_out;
use crate::events::{EventBus, EventKind, SubscriptionId};
use crate::model::{current_visual, CoverRect, SurfaceSize, PROGRESS_COVERED};
use crate::timer::{TimerId, TimerQueue};

/// Which part of the blink is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Idle,
    /// Cover moving down, progress 0 → 1
    Descending,
    /// Cover retracting, progress 1 → 2
    Ascending,
}

/// Snapshot handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkFrame {
    pub phase: BlinkPhase,
    /// In [0, 2]
    pub progress: f64,
}

impl BlinkFrame {
    pub fn idle() -> Self {
        Self {
            phase: BlinkPhase::Idle,
            progress: 0.0,
        }
    }

    /// Whether anything needs drawing.
    pub fn is_visible(&self) -> bool {
        self.phase != BlinkPhase::Idle
    }

    /// Cover rectangle for this frame on `surface`.
    pub fn cover(&self, surface: SurfaceSize) -> CoverRect {
        current_visual(self.progress, surface)
    }
}

/// Runs one blink at a time.
pub struct BlinkAnimator {
    phase: BlinkPhase,
    /// Virtual time the current phase began
    phase_started: Duration,
    phase_duration: Duration,
    phase_timer: Option<TimerId>,
    timers: TimerQueue,
    /// Self-reference for timer callbacks; set by `attach`/`shared`
    this: Weak<RefCell<BlinkAnimator>>,
    subscription: Option<SubscriptionId>,
    completed: u64,
}

impl BlinkAnimator {
    /// Create a shared animator that is not subscribed to any bus.
    ///
    /// A zero `phase_duration` is bumped to one millisecond.
    pub fn shared(phase_duration: Duration, timers: TimerQueue) -> Rc<RefCell<Self>> {
        let animator = Rc::new(RefCell::new(Self {
            phase: BlinkPhase::Idle,
            phase_started: Duration::ZERO,
            phase_duration: phase_duration.max(Duration::from_millis(1)),
            phase_timer: None,
            timers,
            this: Weak::new(),
            subscription: None,
            completed: 0,
        }));
        animator.borrow_mut().this = Rc::downgrade(&animator);
        animator
    }

    /// Create a shared animator subscribed to `TriggerBlink` on `bus`.
    pub fn attach(bus: &EventBus, phase_duration: Duration, timers: TimerQueue) -> Rc<RefCell<Self>> {
        let animator = Self::shared(phase_duration, timers);
        let weak = Rc::downgrade(&animator);
        let id = bus.subscribe(Some(EventKind::TriggerBlink), move |_| {
            if let Some(animator) = weak.upgrade() {
                animator.borrow_mut().on_trigger();
            }
        });
        animator.borrow_mut().subscription = Some(id);
        animator
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn is_blinking(&self) -> bool {
        self.phase != BlinkPhase::Idle
    }

    pub fn phase_duration(&self) -> Duration {
        self.phase_duration
    }

    /// Number of blinks that ran to completion.
    pub fn blinks_completed(&self) -> u64 {
        self.completed
    }

    /// Bus subscription made by [`BlinkAnimator::attach`].
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Start a blink if none is running.
    pub fn on_trigger(&mut self) {
        if self.is_blinking() {
            trace!(phase = ?self.phase, "already blinking, trigger ignored");
            return;
        }
        debug!("blink started");
        self.enter(BlinkPhase::Descending);
    }

    /// Progress at virtual time `now`, eased within each phase.
    pub fn progress_at(&self, now: Duration) -> f64 {
        let t = now.saturating_sub(self.phase_started).as_secs_f64()
            / self.phase_duration.as_secs_f64();
        match self.phase {
            BlinkPhase::Idle => 0.0,
            BlinkPhase::Descending => ease_in_out(t),
            BlinkPhase::Ascending => PROGRESS_COVERED + ease_in_out(t),
        }
    }

    /// Phase and progress at virtual time `now`.
    pub fn frame_at(&self, now: Duration) -> BlinkFrame {
        BlinkFrame {
            phase: self.phase,
            progress: self.progress_at(now),
        }
    }

    fn enter(&mut self, phase: BlinkPhase) {
        self.phase = phase;
        self.phase_started = self.timers.now();
        self.phase_timer = None;

        let next = match phase {
            BlinkPhase::Idle => {
                self.completed += 1;
                debug!(completed = self.completed, "blink finished");
                return;
            }
            BlinkPhase::Descending => BlinkPhase::Ascending,
            BlinkPhase::Ascending => BlinkPhase::Idle,
        };

        debug!(?phase, "blink phase");
        let weak = self.this.clone();
        let id = self.timers.schedule_once(self.phase_duration, move || {
            if let Some(animator) = weak.upgrade() {
                animator.borrow_mut().enter(next);
            }
        });
        self.phase_timer = Some(id);
    }
}

impl Drop for BlinkAnimator {
    fn drop(&mut self) {
        if let Some(id) = self.phase_timer.take() {
            self.timers.cancel(id);
        }
    }
}
