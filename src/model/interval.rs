//! Blink interval value type.

use std::fmt;
use std::time::Duration;

use super::constants::{
    DEFAULT_INTERVAL_SECS, INTERVAL_CHOICES_SECS, MAX_INTERVAL_SECS, MIN_INTERVAL_SECS,
};
use crate::error::{Error, Result};

/// Time between automatic blinks.
///
/// Always within [`MIN_INTERVAL_SECS`, `MAX_INTERVAL_SECS`]; constructing one
/// from anything else (including NaN and infinities) fails, so converting to
/// a `Duration` never can.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Interval(f64);

impl Interval {
    /// Validate a number of seconds.
    pub fn from_secs(secs: f64) -> Result<Self> {
        if (MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) {
            Ok(Self(secs))
        } else {
            Err(Error::InvalidInterval(secs))
        }
    }

    /// The interval in seconds.
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// The interval as a `Duration`, for the timer queue.
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }

    /// The intervals offered by the status bar menu.
    pub fn choices() -> impl Iterator<Item = Interval> {
        INTERVAL_CHOICES_SECS.iter().map(|&s| Interval(s))
    }

    /// Menu label: "30 seconds", "1 minute", "1.5 minutes", "2 minutes".
    pub fn label(self) -> String {
        let secs = self.0;
        if secs < 60.0 {
            format!("{} {}", trim_number(secs), plural(secs, "second"))
        } else {
            let minutes = secs / 60.0;
            format!("{} {}", trim_number(minutes), plural(minutes, "minute"))
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_SECS)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", trim_number(self.0))
    }
}

/// Format without a trailing ".0", keeping at most two decimals.
fn trim_number(v: f64) -> String {
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn plural(v: f64, unit: &str) -> String {
    if (v - 1.0).abs() < f64::EPSILON {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}
