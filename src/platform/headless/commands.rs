//! Console commands for the headless host.
//!
//! Stand-ins for the menu bar: one command per line on stdin.

use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, info, warn};

use crate::app::BlinkApp;
use crate::error::{Error, Result};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostCommand {
    /// `interval <seconds>` (or `i <seconds>`)
    SelectInterval(f64),
    /// `test` (or `t`)
    TriggerNow,
    /// `status` (or `s`)
    Status,
    /// `help` (or `h`, `?`)
    Help,
    /// `quit` (or `q`)
    Quit,
}

/// Whether the host loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub const HELP: &str = "commands: interval <seconds> | test | status | help | quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<HostCommand>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "t" | "test" => HostCommand::TriggerNow,
        "q" | "quit" | "exit" => HostCommand::Quit,
        "s" | "status" => HostCommand::Status,
        "h" | "help" | "?" => HostCommand::Help,
        "i" | "interval" => {
            let secs = words
                .next()
                .and_then(|w| w.parse::<f64>().ok())
                .ok_or_else(|| Error::UnknownCommand(line.trim().to_string()))?;
            HostCommand::SelectInterval(secs)
        }
        _ => return Err(Error::UnknownCommand(line.trim().to_string())),
    };

    if words.next().is_some() {
        return Err(Error::UnknownCommand(line.trim().to_string()));
    }
    Ok(Some(command))
}

/// Apply a command to the app.
pub fn handle_command(app: &mut BlinkApp, command: HostCommand) -> Flow {
    match command {
        HostCommand::SelectInterval(secs) => {
            // Rejections are already logged by the control surface.
            let _ = app.select_interval(secs);
        }
        HostCommand::TriggerNow => app.trigger_now(),
        HostCommand::Status => {
            info!(
                interval = %app.current_interval(),
                state = ?app.schedule_state(),
                blinking = app.is_blinking(),
                blinks = app.blinks_completed(),
                next_timer = ?app.timers().next_deadline(),
                "status"
            );
        }
        HostCommand::Help => info!("{HELP}"),
        HostCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Read stdin lines on a background thread and forward parsed commands.
///
/// The thread ends at EOF or when the receiver is dropped.
pub fn spawn_stdin_reader(sender: Sender<HostCommand>) -> Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "stopped reading console input");
                        break;
                    }
                };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if sender.send(command).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("{e}"),
                }
            }
            debug!("console input closed");
        })?;
    Ok(handle)
}
