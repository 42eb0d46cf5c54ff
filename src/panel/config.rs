//! Connection settings for the panel's HTTP client. Values come from the CLI
//! (and therefore from `USERPANEL_*` environment variables); nothing here is
//! secret.

use super::errors::AppError;
use std::time::Duration;
use url::Url;

/// Default request timeout applied to every backend call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl PanelConfig {
    /// Validates and normalizes the backend base URL.
    /// # Errors
    /// Returns `AppError::Config` if the URL is empty, unparsable, or not http(s).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = normalize_base_url(base_url)
            .ok_or_else(|| AppError::Config("Backend URL is required.".to_string()))?;

        let parsed = Url::parse(&base_url)
            .map_err(|err| AppError::Config(format!("Invalid backend URL {base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Backend URL must start with http:// or https://, got {base_url}"
            )));
        }

        Ok(Self { base_url, timeout })
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn normalize_base_url(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
