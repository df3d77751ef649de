//! BlinkOverlayView, the NSView subclass behind the overlay window.
//!
//! The view draws the cover, drives the core from its frame timer and is
//! the target of the status bar menu actions.

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{SurfaceSize, FRAME_PERIOD};
use crate::platform::macos::app::state::{elapsed, take_app, with_app};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, NSApp, NSPoint, NSRect, NSSize, ObjectExt,
    YES,
};
use crate::platform::macos::ui::overlay::drawing::AppKitRenderer;
use crate::platform::macos::ui::status_bar::sync_interval_checks;

/// Objective-C class name of the overlay view.
pub const VIEW_CLASS: &str = "BlinkOverlayView";

/// Register the view class (once) and create an instance as the window's
/// content view.
///
/// # Safety
/// Must be called from the main thread. The window must be a valid NSWindow.
pub unsafe fn register_and_create_view(window: id, width: f64, height: f64) -> id {
    let class_name = c"BlinkOverlayView";
    let view_class = if let Some(cls) = AnyClass::get(class_name) {
        cls
    } else {
        let superclass = get_class("NSView");
        let mut builder = ClassBuilder::new(class_name, superclass)
            .unwrap_or_else(|| panic!("class '{}' could not be declared", VIEW_CLASS));
        builder.add_ivar::<id>(c"_frameTimer");
        register_methods(&mut builder);
        builder.register()
    };

    let view: id = msg_send![view_class, alloc];
    let frame = NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(width, height));
    let view: id = msg_send![view, initWithFrame: frame];
    (*view).store_ivar::<id>("_frameTimer", nil);

    let _: () = msg_send![window, setContentView: view];
    view
}

unsafe fn register_methods(builder: &mut ClassBuilder) {
    builder.add_method(
        sel!(isFlipped),
        is_flipped as unsafe extern "C-unwind" fn(_, _) -> _,
    );
    builder.add_method(
        sel!(drawRect:),
        draw_rect as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(frameTick:),
        frame_tick as unsafe extern "C-unwind" fn(_, _, _),
    );

    // Status bar menu actions
    builder.add_method(
        sel!(selectInterval:),
        select_interval as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(testBlink:),
        test_blink as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(quitApp:),
        quit_app as unsafe extern "C-unwind" fn(_, _, _),
    );
}

/// Start the frame timer on the view. Runs in common modes so blinks keep
/// animating while the status menu is open.
///
/// # Safety
/// `view` must be a BlinkOverlayView. Main thread only.
pub unsafe fn start_frame_timer(view: id) -> Result<id> {
    let prev: id = *(*view).load_ivar::<id>("_frameTimer");
    if prev != nil {
        let _: () = msg_send![prev, invalidate];
        (*view).store_ivar::<id>("_frameTimer", nil);
    }

    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: FRAME_PERIOD.as_secs_f64(),
        target: view,
        selector: sel!(frameTick:),
        userInfo: nil,
        repeats: YES
    ];
    if timer == nil {
        return Err(Error::TimerUnavailable("NSTimer returned nil".into()));
    }

    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    let common_modes = nsstring_id("kCFRunLoopCommonModes");
    let _: () = msg_send![run_loop, addTimer: timer, forMode: common_modes];

    (*view).store_ivar::<id>("_frameTimer", timer);
    Ok(timer)
}

/// Stop the frame timer if one is running.
///
/// # Safety
/// `view` must be a BlinkOverlayView. Main thread only.
pub unsafe fn stop_frame_timer(view: id) {
    let timer: id = *(*view).load_ivar::<id>("_frameTimer");
    if timer != nil {
        let _: () = msg_send![timer, invalidate];
        (*view).store_ivar::<id>("_frameTimer", nil);
    }
}

unsafe extern "C-unwind" fn is_flipped(_this: &AnyObject, _cmd: Sel) -> Bool {
    Bool::YES
}

unsafe extern "C-unwind" fn draw_rect(this: &AnyObject, _cmd: Sel, _rect: NSRect) {
    let bounds: NSRect = msg_send![this, bounds];
    let surface = SurfaceSize::new(bounds.size.width, bounds.size.height);
    let mut renderer = AppKitRenderer::new(bounds);
    with_app(|app| app.render(&mut renderer, surface));
}

unsafe extern "C-unwind" fn frame_tick(this: &mut AnyObject, _cmd: Sel, _timer: id) {
    let now = elapsed();
    let redraw = with_app(|app| {
        let was_blinking = app.is_blinking();
        app.advance_to(now);
        was_blinking || app.is_blinking()
    })
    .unwrap_or(false);

    if redraw {
        let _: () = msg_send![this, setNeedsDisplay: YES];
    }
}

unsafe extern "C-unwind" fn select_interval(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    // Menu items carry the interval in seconds as their tag.
    let tag: isize = msg_send![sender, tag];
    let selected = with_app(|app| {
        app.select_interval(tag as f64)
            .ok()
            .map(|_| app.current_interval())
    })
    .flatten();
    if let Some(interval) = selected {
        sync_interval_checks(interval);
    }
}

unsafe extern "C-unwind" fn test_blink(this: &mut AnyObject, _cmd: Sel, _sender: id) {
    debug!("test blink requested from menu");
    with_app(|app| app.trigger_now());
    let _: () = msg_send![this, setNeedsDisplay: YES];
}

unsafe extern "C-unwind" fn quit_app(this: &mut AnyObject, _cmd: Sel, _sender: id) {
    info!("quit requested from menu");
    stop_frame_timer(this as *mut _ as id);
    shutdown_app();
    let _: () = msg_send![NSApp(), terminate: nil];
}

/// Stop the core and drop it. Safe to call more than once.
pub fn shutdown_app() {
    with_app(|app| app.shutdown());
    if take_app().is_some() {
        info!("blink app shut down");
    }
}
