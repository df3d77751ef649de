//! Main-thread runtime state for the macOS host.
//!
//! AppKit callbacks are plain `extern "C-unwind"` functions, so the blink
//! core lives in a thread-local that every callback reaches through
//! `with_app`.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use crate::app::BlinkApp;
use crate::error::{Error, Result};

thread_local! {
    static APP: RefCell<Option<BlinkApp>> = const { RefCell::new(None) };
    static EPOCH: Cell<Option<Instant>> = const { Cell::new(None) };
}

/// Install the app for this thread and start the clock.
pub fn install_app(app: BlinkApp) -> Result<()> {
    APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(Error::AlreadyRunning);
        }
        *slot = Some(app);
        EPOCH.with(|e| e.set(Some(Instant::now())));
        Ok(())
    })
}

/// Run `f` against the installed app. `None` before install or after teardown.
///
/// Re-entrant calls from inside `f` also see `None`.
pub fn with_app<R>(f: impl FnOnce(&mut BlinkApp) -> R) -> Option<R> {
    APP.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

/// Drop the app (after `shutdown`). Later callbacks become no-ops.
pub fn take_app() -> Option<BlinkApp> {
    APP.with(|slot| slot.borrow_mut().take())
}

/// Time since `install_app`; this is the virtual clock the core runs on.
pub fn elapsed() -> Duration {
    EPOCH.with(|e| e.get().map(|t| t.elapsed()).unwrap_or_default())
}
