//! Cover drawing for the overlay view.
//!
//! Runs inside `drawRect:`; the view is flipped, so `CoverRect` coordinates
//! (origin top-left) map straight onto view coordinates.

use crate::app::CoverRenderer;
use crate::blink::BlinkFrame;
use crate::clamp;
use crate::model::CoverRect;
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, CGFloat, NSPoint, NSRect, NSSize,
};

/// `NSCompositingOperationCopy`
const COMPOSITE_COPY: usize = 1;
/// `NSCompositingOperationSourceOver`
const COMPOSITE_SOURCE_OVER: usize = 2;

/// Draws covers with `NSBezierPath` into the current graphics context.
pub struct AppKitRenderer {
    bounds: NSRect,
}

impl AppKitRenderer {
    /// Renderer for a view whose bounds are `bounds`.
    pub fn new(bounds: NSRect) -> Self {
        Self { bounds }
    }
}

/// Convert a cover to a view rect.
pub fn cover_to_rect(cover: &CoverRect) -> NSRect {
    NSRect::new(
        NSPoint::new(cover.x as CGFloat, cover.y as CGFloat),
        NSSize::new(cover.width as CGFloat, cover.height as CGFloat),
    )
}

impl CoverRenderer for AppKitRenderer {
    fn draw(&mut self, _frame: BlinkFrame, cover: CoverRect, opacity: f64) {
        self.clear();
        if cover.is_empty() {
            return;
        }
        unsafe {
            let black: id = msg_send![
                get_class("NSColor"),
                colorWithCalibratedWhite: 0.0f64,
                alpha: clamp(opacity, 0.0, 1.0)
            ];
            let _: () = msg_send![black, set];
            let _: () = msg_send![get_class("NSBezierPath"), fillRect: cover_to_rect(&cover)];
        }
    }

    fn clear(&mut self) {
        unsafe {
            let ctx: id = msg_send![get_class("NSGraphicsContext"), currentContext];
            let _: () = msg_send![ctx, setCompositingOperation: COMPOSITE_COPY];
            let clear: id = msg_send![get_class("NSColor"), clearColor];
            let _: () = msg_send![clear, set];
            let _: () = msg_send![get_class("NSBezierPath"), fillRect: self.bounds];
            let _: () = msg_send![ctx, setCompositingOperation: COMPOSITE_SOURCE_OVER];
        }
    }
}
