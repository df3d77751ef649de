//! System notifications the macOS host reacts to.

pub mod observers;

pub use observers::{install_screen_change_observer, install_termination_observer};
