use clap::{Arg, ArgAction, Command};

pub const CMD_SERVER: &str = "server";
pub const ARG_PORT: &str = "port";
pub const ARG_EMPTY: &str = "empty";

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_SERVER)
        .about("Run the user service")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("USERPANEL_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_EMPTY)
                .long("empty")
                .help("Start with no users instead of the demo set")
                .env("USERPANEL_EMPTY")
                .action(ArgAction::SetTrue),
        )
}
