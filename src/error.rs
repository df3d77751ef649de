//! Crate-wide error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid blink interval: {0} s (must be between 0.001 and 31536000 seconds)")]
    InvalidInterval(f64),

    #[error("invalid blink phase duration: {0} ms (must be greater than zero)")]
    InvalidBlinkDuration(u64),

    #[error("invalid startup blink delay: {0} s (must be between 0 and 31536000 seconds)")]
    InvalidStartupDelay(f64),

    #[error("invalid cover opacity: {0} (must be within 0.0..=1.0)")]
    InvalidOpacity(f64),

    #[error("could not schedule the frame timer: {0}")]
    TimerUnavailable(String),

    #[error("no screen available for the overlay")]
    NoScreen,

    #[error("the blink app is already running on this thread")]
    AlreadyRunning,

    #[error("unknown command: {0:?} (try \"help\")")]
    UnknownCommand(String),

    #[error("failed to read console input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
