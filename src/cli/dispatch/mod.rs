//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{panel, server, Action};
use crate::cli::commands::{panel as panel_args, server as server_args};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing or no subcommand was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((server_args::CMD_SERVER, sub)) => Ok(Action::Server(server::Args {
            port: sub
                .get_one::<u16>(server_args::ARG_PORT)
                .copied()
                .unwrap_or(8080),
            seeded: !sub.get_flag(server_args::ARG_EMPTY),
        })),
        Some((panel_args::CMD_PANEL, sub)) => {
            let url = sub
                .get_one::<String>(panel_args::ARG_URL)
                .cloned()
                .context("missing required argument: --url")?;
            let timeout = sub
                .get_one::<u64>(panel_args::ARG_TIMEOUT)
                .copied()
                .context("missing required argument: --timeout")?;

            Ok(Action::Panel(panel::Args {
                url,
                timeout: Duration::from_secs(timeout),
            }))
        }
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand, try --help")),
    }
}
