//! Backend access for the panel. `UsersApi` is the seam the controller is
//! generic over; `HttpUsersApi` is the real implementation on top of
//! `reqwest`, keeping endpoint paths, timeouts and error mapping in one place.

use super::{config::PanelConfig, errors::AppError};
use crate::{
    model::{MessageBody, User, UserInput},
    APP_USER_AGENT,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
const USERS_PATH: &str = "/api/users";

/// Typed calls against the `/api/users` contract.
///
/// Every call resolves to either the decoded payload or an [`AppError`];
/// callers match on the result instead of unwinding.
#[allow(async_fn_in_trait)]
pub trait UsersApi {
    /// `GET /api/users`
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    /// `POST /api/users` with `{"name": name}`
    async fn create_user(&self, name: &str) -> Result<User, AppError>;
    /// `PUT /api/users/{id}` with `{"name": name}`
    async fn update_user(&self, id: u64, name: &str) -> Result<User, AppError>;
    /// `DELETE /api/users/{id}`
    async fn delete_user(&self, id: u64) -> Result<MessageBody, AppError>;
}

#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    http: Client,
    base_url: String,
}

impl HttpUsersApi {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &PanelConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

impl UsersApi for HttpUsersApi {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let response = self
            .http
            .get(self.url(USERS_PATH))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self))]
    async fn create_user(&self, name: &str) -> Result<User, AppError> {
        let response = self
            .http
            .post(self.url(USERS_PATH))
            .json(&UserInput::named(name))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self))]
    async fn update_user(&self, id: u64, name: &str) -> Result<User, AppError> {
        let response = self
            .http
            .put(self.url(&format!("{USERS_PATH}/{id}")))
            .json(&UserInput::named(name))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: u64) -> Result<MessageBody, AppError> {
        let response = self
            .http
            .delete(self.url(&format!("{USERS_PATH}/{id}")))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    debug!(%status, "backend responded");

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
