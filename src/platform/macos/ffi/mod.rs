//! Objective-C runtime helpers for the macOS host.

pub mod bridge;

pub use bridge::*;
