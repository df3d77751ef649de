//! macOS application lifecycle.

pub mod runner;
pub mod state;

pub use runner::run;
