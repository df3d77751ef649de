//! Thin helpers over objc2 for untyped AppKit messaging.
//!
//! The overlay and the status bar talk to AppKit through `msg_send!` on raw
//! object pointers; this module collects the aliases and small helpers they
//! share.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel};
pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

pub use objc2_app_kit::{
    NSApplicationActivationPolicy, NSBackingStoreType, NSWindowCollectionBehavior,
    NSWindowStyleMask,
};

pub use objc2_core_foundation::CGFloat;

pub use block2::RcBlock;

use objc2::encode::Encode;
use objc2::rc::Retained;

/// Objective-C object pointer.
pub type id = *mut AnyObject;

/// Null object pointer.
pub const nil: id = std::ptr::null_mut();

/// Objective-C `YES` (a `BOOL`, not a Rust `bool`).
pub const YES: Bool = Bool::YES;

/// Objective-C `NO`.
pub const NO: Bool = Bool::NO;

/// `NSControlStateValueOn`
pub const NS_CONTROL_STATE_ON: isize = 1;

/// `NSControlStateValueOff`
pub const NS_CONTROL_STATE_OFF: isize = 0;

/// Get the shared NSApplication instance.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![get_class("NSApplication"), sharedApplication] }
}

/// Create an autoreleased NSString and return it as a raw pointer.
///
/// Only valid until the enclosing autorelease pool drains; AppKit setters
/// copy or retain what they keep.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    let ns: Retained<NSString> = NSString::from_str(s);
    Retained::autorelease_ptr(ns) as id
}

/// Get a class by name, panicking if it is not registered.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = std::ffi::CString::new(name).expect("Invalid class name");
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("Class '{}' not found", name))
}

/// Instance variable access on classes built with `ClassBuilder`.
pub trait ObjectExt {
    /// Load a reference to an instance variable.
    ///
    /// # Safety
    /// The ivar must exist and be of type T. Main thread only for UI objects.
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T;

    /// Store a value in an instance variable.
    ///
    /// # Safety
    /// The ivar must exist and be of type T. Main thread only for UI objects.
    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T);
}

impl ObjectExt for AnyObject {
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T {
        let cls = self.class();
        let c_name = std::ffi::CString::new(name).expect("Invalid ivar name");
        let ivar = cls
            .instance_variable(&c_name)
            .unwrap_or_else(|| panic!("ivar '{}' not found", name));
        ivar.load::<T>(self)
    }

    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T) {
        let cls = self.class();
        let c_name = std::ffi::CString::new(name).expect("Invalid ivar name");
        let ivar = cls
            .instance_variable(&c_name)
            .unwrap_or_else(|| panic!("ivar '{}' not found", name));
        *ivar.load_mut::<T>(self) = value;
    }
}

/// Run a closure within an autorelease pool.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    unsafe {
        let pool: id = msg_send![get_class("NSAutoreleasePool"), new];
        let result = f();
        let _: () = msg_send![pool, drain];
        result
    }
}
