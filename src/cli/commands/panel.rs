use crate::panel::config::DEFAULT_BASE_URL;
use clap::{Arg, Command};

pub const CMD_PANEL: &str = "panel";
pub const ARG_URL: &str = "url";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_PANEL)
        .about("Open the interactive user panel against a running user service")
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long("url")
                .help("Base URL of the user service")
                .default_value(DEFAULT_BASE_URL)
                .env("USERPANEL_URL"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("USERPANEL_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
