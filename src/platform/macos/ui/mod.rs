//! AppKit UI: the overlay window's view and the status bar menu.

pub mod overlay;
pub mod status_bar;

pub use overlay::{register_and_create_view, shutdown_app, start_frame_timer, stop_frame_timer};
pub use status_bar::{install_status_bar, sync_interval_checks};
