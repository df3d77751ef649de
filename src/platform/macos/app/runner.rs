//! macOS entry point: overlay window, status bar, frame timer, run loop.

use tracing::{info, warn};

use crate::app::BlinkApp;
use crate::config::BlinkConfig;
use crate::error::{Error, Result};
use crate::events;
use crate::platform::macos::app::state::{install_app, with_app};
use crate::platform::macos::ffi::bridge::{
    autoreleasepool, get_class, id, msg_send, nil, NSApp, NSApplicationActivationPolicy,
    NSBackingStoreType, NSRect, NSWindowCollectionBehavior, NSWindowStyleMask, NO, YES,
};
use crate::platform::macos::input::{install_screen_change_observer, install_termination_observer};
use crate::platform::macos::ui::{install_status_bar, register_and_create_view, start_frame_timer};
use crate::timer::TimerQueue;

/// `NSStatusWindowLevel`, above normal and floating windows.
const OVERLAY_WINDOW_LEVEL: isize = 25;

/// Run the menu bar app until the user quits.
pub fn run(config: BlinkConfig) -> Result<()> {
    autoreleasepool(|| unsafe {
        let app = NSApp();
        let _: bool = msg_send![app, setActivationPolicy: NSApplicationActivationPolicy::Accessory];

        let screen: id = msg_send![get_class("NSScreen"), mainScreen];
        if screen == nil {
            return Err(Error::NoScreen);
        }

        let blink_app = BlinkApp::new(config, &events::bus(), TimerQueue::new());
        let choices = blink_app.interval_choices();
        install_app(blink_app)?;

        let (window, view) = make_overlay_window(screen);
        // Retain so the pool drain does not free them.
        let _: id = msg_send![window, retain];
        let _: id = msg_send![view, retain];
        let _: () = msg_send![window, orderFrontRegardless];

        start_frame_timer(view)?;
        install_status_bar(view, &choices);
        install_termination_observer(view);
        install_screen_change_observer(window);

        with_app(|a| a.start());
        info!("menu bar app ready");

        let _: () = msg_send![app, run];
        Ok(())
    })
}

/// Create the transparent, click-through overlay window for `screen`.
///
/// # Safety
/// The screen must be a valid NSScreen instance.
unsafe fn make_overlay_window(screen: id) -> (id, id) {
    let frame: NSRect = msg_send![screen, frame];
    if frame.size.width <= 0.0 || frame.size.height <= 0.0 {
        warn!(
            width = frame.size.width,
            height = frame.size.height,
            "main screen reports an empty frame"
        );
    }

    let window: id = msg_send![get_class("NSWindow"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: frame,
        styleMask: NSWindowStyleMask::Borderless,
        backing: NSBackingStoreType::Buffered,
        defer: NO
    ];

    let _: () = msg_send![window, setOpaque: NO];
    let clear_color: id = msg_send![get_class("NSColor"), clearColor];
    let _: () = msg_send![window, setBackgroundColor: clear_color];
    let _: () = msg_send![window, setHasShadow: NO];
    let _: () = msg_send![window, setIgnoresMouseEvents: YES];
    let _: () = msg_send![window, setLevel: OVERLAY_WINDOW_LEVEL];

    let behavior = NSWindowCollectionBehavior::CanJoinAllSpaces
        | NSWindowCollectionBehavior::FullScreenAuxiliary;
    let _: () = msg_send![window, setCollectionBehavior: behavior];

    let view = register_and_create_view(window, frame.size.width, frame.size.height);
    (window, view)
}
