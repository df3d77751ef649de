//! Startup configuration.
//!
//! Options come from the command line only; nothing is read from or written
//! to disk, so every launch starts from these values.

use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};
use crate::model::{
    Interval, DEFAULT_BLINK_PHASE_MS, DEFAULT_COVER_OPACITY, DEFAULT_INTERVAL_SECS,
    DEFAULT_STARTUP_DELAY_SECS, MAX_INTERVAL_SECS, MAX_OPACITY, MIN_OPACITY,
};

/// Command line options.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eyeblink",
    version,
    about = "Blinks a dark cover over the screen every few minutes so you rest your eyes."
)]
pub struct Cli {
    /// Seconds between automatic blinks (any positive value)
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: f64,

    /// Duration of each half of the blink, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_BLINK_PHASE_MS)]
    pub blink_ms: u64,

    /// Seconds after launch before the startup test blink
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_STARTUP_DELAY_SECS)]
    pub startup_delay: f64,

    /// Skip the test blink shortly after launch
    #[arg(long)]
    pub no_startup_blink: bool,

    /// Opacity of the black cover, 0.0 to 1.0
    #[arg(long, value_name = "ALPHA", default_value_t = DEFAULT_COVER_OPACITY)]
    pub opacity: f64,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "eyeblink=trace")
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkConfig {
    pub interval: Interval,
    pub phase_duration: Duration,
    /// `None` disables the startup blink
    pub startup_delay: Option<Duration>,
    pub cover_opacity: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval: Interval::default(),
            phase_duration: Duration::from_millis(DEFAULT_BLINK_PHASE_MS),
            startup_delay: Some(Duration::from_secs_f64(DEFAULT_STARTUP_DELAY_SECS)),
            cover_opacity: DEFAULT_COVER_OPACITY,
        }
    }
}

impl TryFrom<&Cli> for BlinkConfig {
    type Error = Error;

    fn try_from(cli: &Cli) -> Result<Self> {
        let interval = Interval::from_secs(cli.interval)?;

        if cli.blink_ms == 0 {
            return Err(Error::InvalidBlinkDuration(cli.blink_ms));
        }

        let startup_delay = if cli.no_startup_blink {
            None
        } else {
            Some(validate_startup_delay(cli.startup_delay)?)
        };

        if !(MIN_OPACITY..=MAX_OPACITY).contains(&cli.opacity) {
            return Err(Error::InvalidOpacity(cli.opacity));
        }

        Ok(Self {
            interval,
            phase_duration: Duration::from_millis(cli.blink_ms),
            startup_delay,
            cover_opacity: cli.opacity,
        })
    }
}

/// Validate the startup blink delay; same upper bound as the interval.
fn validate_startup_delay(secs: f64) -> Result<Duration> {
    if !(0.0..=MAX_INTERVAL_SECS).contains(&secs) {
        return Err(Error::InvalidStartupDelay(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| Error::InvalidStartupDelay(secs))
}
