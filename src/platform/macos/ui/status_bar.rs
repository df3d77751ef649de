//! Status bar (menu bar) item with dropdown menu.
//!
//! Creates an eye icon in the macOS menu bar with:
//! - Blink Interval submenu (30 seconds, 1 minute, 1.5 minutes, 2 minutes)
//! - Test Blink (t)
//! - Quit (q)

use std::cell::{Cell, RefCell};

use objc2::runtime::Sel;
use tracing::debug;

use crate::model::{Interval, IntervalChoice};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, sel, NS_CONTROL_STATE_OFF, NS_CONTROL_STATE_ON,
    YES,
};

thread_local! {
    /// The status item (retained for the app's lifetime).
    static STATUS_ITEM: Cell<id> = const { Cell::new(std::ptr::null_mut()) };
    /// Interval submenu rows, so the checkmark can follow the selection.
    static INTERVAL_ITEMS: RefCell<Vec<(Interval, id)>> = const { RefCell::new(Vec::new()) };
}

/// Install the status bar item with its menu; `target` receives the actions.
///
/// # Safety
/// Must be called from main thread, after the app is initialized.
pub unsafe fn install_status_bar(target: id, choices: &[IntervalChoice]) {
    let status_bar: id = msg_send![get_class("NSStatusBar"), systemStatusBar];

    // NSVariableStatusItemLength = -1.0
    let status_item: id = msg_send![status_bar, statusItemWithLength: -1.0f64];
    let _: id = msg_send![status_item, retain];
    STATUS_ITEM.with(|s| s.set(status_item));

    let button: id = msg_send![status_item, button];
    if button != nil {
        let icon: id = msg_send![
            get_class("NSImage"),
            imageWithSystemSymbolName: nsstring_id("eye"),
            accessibilityDescription: nsstring_id("Blink")
        ];
        if icon != nil {
            let _: () = msg_send![icon, setTemplate: YES];
            let _: () = msg_send![button, setImage: icon];
        } else {
            // Older systems without SF Symbols
            let _: () = msg_send![button, setTitle: nsstring_id("Blink")];
        }
    }

    let menu = create_status_menu(target, choices);
    let _: () = msg_send![status_item, setMenu: menu];
}

unsafe fn menu_item(title: &str, action: Sel, key: &str, target: id) -> id {
    let item: id = msg_send![get_class("NSMenuItem"), alloc];
    let item: id = msg_send![
        item,
        initWithTitle: nsstring_id(title),
        action: action,
        keyEquivalent: nsstring_id(key)
    ];
    let _: () = msg_send![item, setTarget: target];
    item
}

unsafe fn create_status_menu(target: id, choices: &[IntervalChoice]) -> id {
    let menu: id = msg_send![get_class("NSMenu"), alloc];
    let menu: id = msg_send![menu, init];

    // Interval submenu; each row's tag is its interval in whole seconds.
    let submenu: id = msg_send![get_class("NSMenu"), alloc];
    let submenu: id = msg_send![submenu, initWithTitle: nsstring_id("Blink Interval")];
    let mut rows = Vec::with_capacity(choices.len());
    for choice in choices {
        let item = menu_item(&choice.label, sel!(selectInterval:), "", target);
        let _: () = msg_send![item, setTag: choice.interval.as_secs().round() as isize];
        let _: () = msg_send![item, setState: check_state(choice.checked)];
        let _: () = msg_send![submenu, addItem: item];
        rows.push((choice.interval, item));
    }
    INTERVAL_ITEMS.with(|items| *items.borrow_mut() = rows);

    let interval_item: id = msg_send![get_class("NSMenuItem"), alloc];
    let interval_item: id = msg_send![
        interval_item,
        initWithTitle: nsstring_id("Blink Interval"),
        action: None::<Sel>,
        keyEquivalent: nsstring_id("")
    ];
    let _: () = msg_send![interval_item, setSubmenu: submenu];
    let _: () = msg_send![menu, addItem: interval_item];

    let separator: id = msg_send![get_class("NSMenuItem"), separatorItem];
    let _: () = msg_send![menu, addItem: separator];

    let test_item = menu_item("Test Blink", sel!(testBlink:), "t", target);
    let _: () = msg_send![menu, addItem: test_item];

    let separator: id = msg_send![get_class("NSMenuItem"), separatorItem];
    let _: () = msg_send![menu, addItem: separator];

    let quit_item = menu_item("Quit", sel!(quitApp:), "q", target);
    let _: () = msg_send![menu, addItem: quit_item];

    menu
}

fn check_state(checked: bool) -> isize {
    if checked {
        NS_CONTROL_STATE_ON
    } else {
        NS_CONTROL_STATE_OFF
    }
}

/// Move the checkmark to `current`.
///
/// # Safety
/// Main thread only, after `install_status_bar`.
pub unsafe fn sync_interval_checks(current: Interval) {
    debug!(interval = %current, "updating interval checkmarks");
    INTERVAL_ITEMS.with(|items| {
        for (interval, item) in items.borrow().iter() {
            let _: () = msg_send![*item, setState: check_state(*interval == current)];
        }
    });
}
