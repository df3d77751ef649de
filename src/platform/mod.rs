//! Platform hosts.
//!
//! macOS gets the menu bar app with a real overlay window. Everywhere else
//! the same core runs under a console host. `run` picks the right one.

#[cfg(target_os = "macos")]
pub mod macos;

pub mod headless;

#[cfg(target_os = "macos")]
pub use macos::run;

#[cfg(not(target_os = "macos"))]
pub use headless::run;
