use crate::panel::{terminal, HttpUsersApi, PanelConfig, UserPanel};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub url: String,
    pub timeout: Duration,
}

/// Execute the panel action: an interactive session on stdin/stdout.
/// # Errors
/// Returns an error if the URL is invalid or the terminal fails.
pub async fn execute(args: Args) -> Result<()> {
    let config = PanelConfig::new(&args.url, args.timeout).context("invalid USERPANEL_URL")?;
    let api = HttpUsersApi::new(&config)?;

    info!("Using user service at {}", api.base_url());

    let mut panel = UserPanel::new(api, terminal::TerminalPrompt::stdio());
    terminal::run(&mut panel).await?;

    Ok(())
}
