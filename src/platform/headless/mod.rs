//! Host for systems without AppKit: a console loop in real time.

pub mod commands;
pub mod runner;

pub use commands::{handle_command, parse_command, Flow, HostCommand};
pub use runner::{run, LogRenderer};
