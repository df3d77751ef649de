//! The interval the user last picked.
//!
//! Belongs to the control surface: it decides which menu item carries the
//! checkmark. The scheduler keeps its own copy and only learns about changes
//! through `IntervalChanged` events.

use super::interval::Interval;

/// One row of the interval submenu.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalChoice {
    pub interval: Interval,
    pub label: String,
    pub checked: bool,
}

/// Holds the current blink interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalStore {
    current: Interval,
}

impl IntervalStore {
    pub fn new(initial: Interval) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Interval {
        self.current
    }

    /// Replace the interval. Returns `false` when it was already set.
    pub fn set(&mut self, interval: Interval) -> bool {
        if self.current == interval {
            return false;
        }
        self.current = interval;
        true
    }

    /// Menu rows with the checkmark on the current interval.
    ///
    /// A custom interval (from the command line) matches none of the rows.
    pub fn choices(&self) -> Vec<IntervalChoice> {
        Interval::choices()
            .map(|interval| IntervalChoice {
                interval,
                label: interval.label(),
                checked: interval == self.current,
            })
            .collect()
    }
}
