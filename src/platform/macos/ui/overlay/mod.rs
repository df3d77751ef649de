//! Overlay view module.
//!
//! Contains the BlinkOverlayView class and the cover drawing.

pub mod drawing;
pub mod view;

pub use drawing::{cover_to_rect, AppKitRenderer};
pub use view::{
    register_and_create_view, shutdown_app, start_frame_timer, stop_frame_timer, VIEW_CLASS,
};
