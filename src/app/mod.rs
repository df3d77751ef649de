//! Application wiring shared by every host.
//!
//! Hosts (the macOS menu bar app, the headless loop) own a [`BlinkApp`],
//! feed it elapsed time and draw what it reports through a
//! [`CoverRenderer`].

pub mod blink_app;

pub use blink_app::{BlinkApp, CoverRenderer};
