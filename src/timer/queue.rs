//! Single-threaded timer queue over a virtual clock.
//!
//! The queue never looks at the wall clock. Its host moves time forward with
//! [`TimerQueue::advance_to`]: the macOS frame timer and the headless loop
//! feed it real elapsed time, tests feed it whatever they like. Every timer
//! due by the new time fires in deadline order, and while a callback runs
//! `now()` reports that timer's exact deadline, so work scheduled from inside
//! a callback lines up without drift.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

/// Handle to a scheduled timer, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

type TimerCallback = Box<dyn FnMut()>;

struct Entry {
    id: TimerId,
    deadline: Duration,
    /// `Some` for repeating timers
    period: Option<Duration>,
    callback: TimerCallback,
}

#[derive(Default)]
struct QueueInner {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
    /// Id of the timer whose callback is running, if any
    firing: Option<TimerId>,
    /// Set when the running timer cancels itself
    firing_cancelled: bool,
}

/// Timer service shared by the scheduler and the animator.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `callback` once, `delay` from now.
    pub fn schedule_once<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        self.insert(delay, None, Box::new(callback))
    }

    /// Run `callback` every `period`, first at `now + period`.
    ///
    /// A zero period is bumped to one nanosecond so the queue cannot spin.
    pub fn schedule_repeating<F>(&self, period: Duration, callback: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        let period = period.max(Duration::from_nanos(1));
        self.insert(period, Some(period), Box::new(callback))
    }

    fn insert(&self, delay: Duration, period: Option<Duration>, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id);
        inner.next_id += 1;
        let deadline = inner.now + delay;
        inner.entries.push(Entry {
            id,
            deadline,
            period,
            callback,
        });
        trace!(?id, ?deadline, repeating = period.is_some(), "timer scheduled");
        id
    }

    /// Cancel a timer. Returns `false` if it already fired (one-shot) or
    /// was cancelled before.
    ///
    /// A timer may cancel itself from inside its own callback.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.firing == Some(id) {
            let first = !inner.firing_cancelled;
            inner.firing_cancelled = true;
            return first;
        }
        match inner.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                inner.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether `id` is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        let inner = self.inner.borrow();
        if inner.firing == Some(id) {
            return !inner.firing_cancelled;
        }
        inner.entries.iter().any(|e| e.id == id)
    }

    /// Number of scheduled timers.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deadline of the earliest scheduled timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().entries.iter().map(|e| e.deadline).min()
    }

    /// Move the clock forward by `delta`, firing everything that comes due.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    /// Move the clock to `target`, firing everything due on the way.
    ///
    /// Returns how many callbacks ran. A target in the past is ignored.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        while let Some(mut entry) = self.pop_due(target) {
            (entry.callback)();
            fired += 1;
            self.finish_firing(entry);
        }
        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
        fired
    }

    /// Take the earliest timer due by `target` out of the queue.
    ///
    /// Ties go to the timer scheduled first.
    fn pop_due(&self, target: Duration) -> Option<Entry> {
        let mut inner = self.inner.borrow_mut();
        let pos = inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= target)
            .min_by_key(|(_, e)| (e.deadline, e.id.0))
            .map(|(pos, _)| pos)?;
        let entry = inner.entries.remove(pos);
        if entry.deadline > inner.now {
            inner.now = entry.deadline;
        }
        inner.firing = Some(entry.id);
        inner.firing_cancelled = false;
        Some(entry)
    }

    /// Reschedule a repeating timer unless its callback cancelled it.
    fn finish_firing(&self, mut entry: Entry) {
        let mut inner = self.inner.borrow_mut();
        let cancelled = inner.firing_cancelled;
        inner.firing = None;
        inner.firing_cancelled = false;
        if let (Some(period), false) = (entry.period, cancelled) {
            entry.deadline += period;
            inner.entries.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn log() -> Rc<RefCell<Vec<(&'static str, Duration)>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn one_shot_fires_once_at_its_deadline() {
        let q = TimerQueue::new();
        let fired = log();
        let (sink, clock) = (fired.clone(), q.clone());
        q.schedule_once(secs(2), move || sink.borrow_mut().push(("once", clock.now())));

        assert_eq!(q.advance(Duration::from_millis(1999)), 0);
        assert_eq!(q.advance(Duration::from_millis(1)), 1);
        assert_eq!(q.advance(secs(10)), 0);
        assert_eq!(*fired.borrow(), vec![("once", secs(2))]);
        assert!(q.is_empty());
    }

    #[test]
    fn repeating_keeps_its_phase() {
        let q = TimerQueue::new();
        let fired = log();
        let (sink, clock) = (fired.clone(), q.clone());
        q.schedule_repeating(secs(30), move || sink.borrow_mut().push(("tick", clock.now())));

        // One big jump still fires each period at its own deadline
        assert_eq!(q.advance_to(secs(95)), 3);
        let times: Vec<Duration> = fired.borrow().iter().map(|(_, t)| *t).collect();
        assert_eq!(times, vec![secs(30), secs(60), secs(90)]);
        assert_eq!(q.now(), secs(95));
        assert_eq!(q.next_deadline(), Some(secs(120)));
    }

    #[test]
    fn timers_fire_in_deadline_order_then_schedule_order() {
        let q = TimerQueue::new();
        let fired = log();
        for (name, at) in [("c", 3), ("a", 1), ("b1", 2), ("b2", 2)] {
            let sink = fired.clone();
            q.schedule_once(secs(at), move || sink.borrow_mut().push((name, secs(at))));
        }
        q.advance(secs(5));
        let names: Vec<&str> = fired.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn cancel_removes_pending_timer() {
        let q = TimerQueue::new();
        let id = q.schedule_repeating(secs(1), || panic!("cancelled timer fired"));
        assert!(q.is_scheduled(id));
        assert!(q.cancel(id));
        assert!(!q.cancel(id));
        assert!(!q.is_scheduled(id));
        assert_eq!(q.advance(secs(5)), 0);
    }

    #[test]
    fn repeating_timer_can_cancel_itself() {
        let q = TimerQueue::new();
        let count = Rc::new(RefCell::new(0));
        let own_id = Rc::new(RefCell::new(None));

        let (handle, counter, slot) = (q.clone(), count.clone(), own_id.clone());
        let id = q.schedule_repeating(secs(1), move || {
            *counter.borrow_mut() += 1;
            if *counter.borrow() == 2 {
                let id = slot.borrow().unwrap();
                assert!(handle.cancel(id));
            }
        });
        *own_id.borrow_mut() = Some(id);

        q.advance(secs(10));
        assert_eq!(*count.borrow(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn callback_can_schedule_relative_to_its_deadline() {
        let q = TimerQueue::new();
        let fired = log();

        let (handle, sink) = (q.clone(), fired.clone());
        q.schedule_once(Duration::from_millis(150), move || {
            let (clock, sink) = (handle.clone(), sink.clone());
            handle.schedule_once(Duration::from_millis(150), move || {
                sink.borrow_mut().push(("second", clock.now()))
            });
        });

        // Jumping well past both deadlines still runs the chained timer at 300ms
        q.advance(secs(1));
        assert_eq!(*fired.borrow(), vec![("second", Duration::from_millis(300))]);
    }

    #[test]
    fn advance_to_the_past_is_ignored() {
        let q = TimerQueue::new();
        q.advance(secs(10));
        q.advance_to(secs(5));
        assert_eq!(q.now(), secs(10));
    }

    #[test]
    fn zero_period_does_not_spin() {
        let q = TimerQueue::new();
        let count = Rc::new(RefCell::new(0u32));
        let counter = count.clone();
        q.schedule_repeating(Duration::ZERO, move || *counter.borrow_mut() += 1);
        q.advance(Duration::from_nanos(5));
        assert_eq!(*count.borrow(), 5);
    }
}
