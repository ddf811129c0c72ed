//! Command implementations.

pub mod customers;
pub mod faqs;
pub mod menu;
pub mod orders;

use std::time::Duration;

use flashfood_admin::api::{ApiClient, ApiError, Session, SessionStore};
use flashfood_admin_core::AdminRole;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Page size used by list commands.
pub const PAGE_SIZE: u32 = 10;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Environment variable or flag has an invalid value.
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    /// Input rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Token and role from flags, falling back to the environment.
pub struct Credentials {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Credentials {
    /// Resolve the role.
    ///
    /// # Errors
    ///
    /// Returns an error if no role is given or it is not a known role.
    pub fn role(&self) -> Result<AdminRole, CliError> {
        let role = self
            .role
            .clone()
            .or_else(|| std::env::var("ADMIN_ROLE").ok())
            .ok_or(CliError::MissingEnvVar("ADMIN_ROLE"))?;
        role.parse().map_err(|e| CliError::InvalidValue("ADMIN_ROLE", e))
    }

    fn token(&self) -> Result<String, CliError> {
        self.token
            .clone()
            .or_else(|| std::env::var("ADMIN_API_TOKEN").ok())
            .filter(|token| !token.trim().is_empty())
            .ok_or(CliError::MissingEnvVar("ADMIN_API_TOKEN"))
    }
}

/// Build a signed-in backend client.
///
/// # Errors
///
/// Returns an error if the base URL, token or role is missing or invalid.
pub fn connect(credentials: &Credentials) -> Result<ApiClient, CliError> {
    let base_url =
        std::env::var("API_BASE_URL").map_err(|_| CliError::MissingEnvVar("API_BASE_URL"))?;
    let base_url = Url::parse(&base_url)
        .map_err(|e| CliError::InvalidValue("API_BASE_URL", e.to_string()))?;
    let timeout = std::env::var("API_TIMEOUT_SECS")
        .ok()
        .map(|secs| {
            secs.parse::<u64>()
                .map_err(|e| CliError::InvalidValue("API_TIMEOUT_SECS", e.to_string()))
        })
        .transpose()?
        .unwrap_or(30);

    let session = SessionStore::with_session(Session::new(credentials.token()?, credentials.role()?));
    tracing::debug!(%base_url, "Connecting to FlashFood API");
    Ok(ApiClient::new(&base_url, Duration::from_secs(timeout), session)?)
}

/// Print a value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

/// Client signed in as a super admin against a mock backend.
#[cfg(test)]
pub(crate) fn test_client(server: &wiremock::MockServer) -> ApiClient {
    let base = Url::parse(&format!("{}/api/v1", server.uri())).expect("url");
    let session = SessionStore::with_session(Session::new("tok", AdminRole::SuperAdmin));
    ApiClient::new(&base, Duration::from_secs(5), session).expect("client")
}
