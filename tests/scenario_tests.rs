//! End-to-end timing scenarios on a manually advanced clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use eyeblink::{
    BlinkApp, BlinkConfig, BlinkEvent, BlinkPhase, Error, EventBus, EventKind, Interval,
    ScheduleState, TimerQueue,
};
use pretty_assertions::assert_eq;

const D: Duration = Duration::from_millis(150);

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn config(interval_secs: f64) -> BlinkConfig {
    BlinkConfig {
        interval: Interval::from_secs(interval_secs).unwrap(),
        ..BlinkConfig::default()
    }
}

/// App on a fresh bus plus a log of the times `TriggerBlink` was published.
fn app_with_trigger_log(interval_secs: f64) -> (BlinkApp, Rc<RefCell<Vec<Duration>>>) {
    let bus = EventBus::new();
    let timers = TimerQueue::new();
    let app = BlinkApp::new(config(interval_secs), &bus, timers.clone());

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    bus.subscribe(Some(EventKind::TriggerBlink), move |_| {
        sink.borrow_mut().push(timers.now())
    });
    (app, log)
}

#[test]
fn startup_blink_then_periodic_triggers() {
    let (app, log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(100));
    assert_eq!(*log.borrow(), vec![secs(2), secs(30), secs(60), secs(90)]);
}

#[test]
fn selecting_an_interval_restarts_the_phase() {
    let (mut app, log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(45));
    app.select_interval(90.0).unwrap();

    app.advance_to(secs(134));
    assert_eq!(*log.borrow(), vec![secs(2), secs(30)]);

    app.advance_to(secs(135));
    assert_eq!(*log.borrow(), vec![secs(2), secs(30), secs(135)]);
    assert_eq!(app.current_interval().as_secs(), 90.0);
}

#[test]
fn trigger_now_runs_one_full_blink_without_moving_the_schedule() {
    let (app, log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(10));

    app.trigger_now();
    assert_eq!(app.frame().phase, BlinkPhase::Descending);

    app.advance_to(secs(10) + D);
    assert_eq!(app.frame().phase, BlinkPhase::Ascending);

    app.advance_to(secs(10) + 2 * D);
    assert_eq!(app.frame().phase, BlinkPhase::Idle);
    assert!(!app.is_blinking());

    app.advance_to(secs(30));
    assert_eq!(*log.borrow(), vec![secs(2), secs(10), secs(30)]);
}

#[test]
fn triggers_during_a_blink_are_dropped() {
    let (app, _log) = app_with_trigger_log(120.0);
    app.trigger_now();
    app.advance_to(Duration::from_millis(100));
    app.trigger_now();
    app.advance_to(Duration::from_millis(200));
    app.trigger_now();
    app.advance_to(secs(1));
    assert_eq!(app.blinks_completed(), 1);

    app.trigger_now();
    app.advance_to(secs(2));
    assert_eq!(app.blinks_completed(), 2);
}

#[test]
fn late_subscribers_see_no_past_events() {
    let bus = EventBus::new();
    bus.publish(BlinkEvent::TriggerBlink);

    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    bus.subscribe(None, move |_| *counter.borrow_mut() += 1);
    assert_eq!(*seen.borrow(), 0);

    bus.publish(BlinkEvent::TriggerBlink);
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn no_startup_blink_when_disabled() {
    let bus = EventBus::new();
    let timers = TimerQueue::new();
    let app = BlinkApp::new(
        BlinkConfig {
            startup_delay: None,
            ..config(30.0)
        },
        &bus,
        timers,
    );
    app.start();
    app.advance_to(secs(29));
    assert_eq!(app.blinks_completed(), 0);
    app.advance_to(secs(31));
    assert_eq!(app.blinks_completed(), 1);
}

#[test]
fn shutdown_stops_everything() {
    let (app, log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(1));
    app.shutdown();
    assert_eq!(app.schedule_state(), ScheduleState::Stopped);

    app.advance_to(secs(300));
    assert!(log.borrow().is_empty());
    assert_eq!(app.timers().next_deadline(), None);
}

#[test]
fn blink_in_flight_completes_across_an_interval_change() {
    let (mut app, _log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(30));
    assert!(app.is_blinking());

    app.select_interval(60.0).unwrap();
    app.advance_to(secs(30) + 2 * D);
    assert!(!app.is_blinking());
    assert_eq!(app.blinks_completed(), 2);
}

#[test]
fn huge_interval_is_refused_and_the_schedule_keeps_running() {
    let (mut app, log) = app_with_trigger_log(30.0);
    app.start();
    app.advance_to(secs(10));

    assert!(matches!(app.select_interval(1e20), Err(Error::InvalidInterval(_))));
    assert_eq!(app.current_interval().as_secs(), 30.0);

    app.advance_to(secs(60));
    assert_eq!(*log.borrow(), vec![secs(2), secs(30), secs(60)]);
}

#[test]
fn sub_millisecond_interval_is_refused_instead_of_flooding() {
    let (mut app, log) = app_with_trigger_log(30.0);
    app.start();

    assert!(matches!(app.select_interval(1e-10), Err(Error::InvalidInterval(_))));
    assert_eq!(app.advance_to(Duration::from_millis(1)), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn shortest_interval_fires_once_per_millisecond() {
    let (mut app, log) = app_with_trigger_log(30.0);
    app.start();
    app.select_interval(0.001).unwrap();

    app.advance_to(Duration::from_millis(5));
    assert_eq!(log.borrow().len(), 5);
}
