//! Console host: real-time loop, no window.
//!
//! Used where there is no AppKit. The cover is reported through tracing
//! instead of being drawn, and the menu is replaced by stdin commands.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::app::{BlinkApp, CoverRenderer};
use crate::blink::{BlinkFrame, BlinkPhase};
use crate::config::BlinkConfig;
use crate::error::Result;
use crate::events;
use crate::model::{CoverRect, SurfaceSize};
use crate::platform::headless::commands::{handle_command, spawn_stdin_reader, Flow, HELP};
use crate::timer::TimerQueue;

/// Longest sleep when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Reports cover changes as log lines.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: Option<BlinkPhase>,
    frames: u64,
}

impl LogRenderer {
    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl CoverRenderer for LogRenderer {
    fn draw(&mut self, frame: BlinkFrame, cover: CoverRect, opacity: f64) {
        self.frames += 1;
        if self.last_phase != Some(frame.phase) {
            debug!(phase = ?frame.phase, "blink phase");
            self.last_phase = Some(frame.phase);
        }
        trace!(
            progress = frame.progress,
            height = cover.height,
            opacity,
            "cover frame"
        );
    }

    fn clear(&mut self) {
        if matches!(self.last_phase, Some(phase) if phase != BlinkPhase::Idle) {
            info!("blink");
        }
        self.last_phase = Some(BlinkPhase::Idle);
    }
}

/// Run until `quit` is entered.
pub fn run(config: BlinkConfig) -> Result<()> {
    let mut app = BlinkApp::new(config, &events::bus(), TimerQueue::new());
    let surface = SurfaceSize::default();

    let (sender, commands) = mpsc::channel();
    let _reader = spawn_stdin_reader(sender)?;
    let mut console_open = true;

    let epoch = Instant::now();
    app.start();
    info!("running without a display; {HELP}");

    let mut renderer = LogRenderer::default();
    loop {
        app.advance_to(epoch.elapsed());
        app.render(&mut renderer, surface);

        let timeout = app
            .next_wakeup()
            .map(|at| at.saturating_sub(epoch.elapsed()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if !console_open {
            thread::sleep(timeout);
            continue;
        }

        match commands.recv_timeout(timeout) {
            Ok(command) => {
                // Commands act at the current time, not the last tick.
                app.advance_to(epoch.elapsed());
                if handle_command(&mut app, command) == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("console closed; continuing on the schedule");
                console_open = false;
            }
        }
    }

    app.shutdown();
    info!(blinks = app.blinks_completed(), "stopped");
    Ok(())
}
