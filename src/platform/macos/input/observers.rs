//! NSNotificationCenter observers for app lifetime and display changes.

use tracing::debug;

use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, NSRect, RcBlock, YES};
use crate::platform::macos::ui::{shutdown_app, stop_frame_timer};

unsafe fn observe(name: &std::ffi::CStr, block: &RcBlock<dyn Fn(id)>) {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    let name: id = msg_send![get_class("NSString"), stringWithUTF8String: name.as_ptr()];
    let _: id =
        msg_send![center, addObserverForName: name, object: nil, queue: nil, usingBlock: &**block];
}

/// Stop the blink core when the app terminates by any route.
///
/// # Safety
/// - `view` must be a valid BlinkOverlayView.
/// - Must be called from main thread with valid autorelease pool.
pub unsafe fn install_termination_observer(view: id) {
    let block: RcBlock<dyn Fn(id)> = RcBlock::new(move |_note: id| unsafe {
        debug!("application will terminate");
        stop_frame_timer(view);
        shutdown_app();
    });
    observe(c"NSApplicationWillTerminateNotification", &block);
}

/// Keep the overlay window matched to the main screen when displays change.
///
/// # Safety
/// - `window` must be the overlay NSWindow.
/// - Must be called from main thread with valid autorelease pool.
pub unsafe fn install_screen_change_observer(window: id) {
    let block: RcBlock<dyn Fn(id)> = RcBlock::new(move |_note: id| unsafe {
        let screen: id = msg_send![get_class("NSScreen"), mainScreen];
        if screen == nil {
            return;
        }
        let frame: NSRect = msg_send![screen, frame];
        debug!(
            width = frame.size.width,
            height = frame.size.height,
            "screen parameters changed, resizing overlay"
        );
        let _: () = msg_send![window, setFrame: frame, display: YES];
    });
    observe(c"NSApplicationDidChangeScreenParametersNotification", &block);
}
