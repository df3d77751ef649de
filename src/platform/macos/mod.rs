//! macOS menu bar host using AppKit via objc2.
//!
//! - FFI helpers for untyped AppKit messaging
//! - Overlay window and view that draw the cover
//! - Status bar menu (interval, test blink, quit)
//! - Notification observers (terminate, screen changes)

pub mod app;
pub mod ffi;
pub mod input;
pub mod ui;

pub use app::run;
