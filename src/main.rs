//! eyeblink: blinks a dark cover over the screen at a fixed interval as a
//! reminder to rest your eyes.
//!
//! On macOS this is a menu bar app; elsewhere it runs as a console host.

use anyhow::Context;
use clap::Parser;
use tracing::error;

use eyeblink::config::{BlinkConfig, Cli};
use eyeblink::{logging, platform};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let config = BlinkConfig::try_from(&cli)
        .inspect_err(|e| error!("{e}"))
        .context("invalid command line options")?;

    platform::run(config).context("blink host stopped with an error")
}
