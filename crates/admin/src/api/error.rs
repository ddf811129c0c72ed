//! Error type for backend API calls.

use flashfood_admin_core::EnvelopeError;
use thiserror::Error;

/// Errors that can occur when talking to the FlashFood backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-zero `EC`.
    #[error("Application error {code}: {}", message.as_deref().unwrap_or("no message"))]
    Application { code: i64, message: Option<String> },

    /// Session token missing, expired or rejected. The session is cleared.
    #[error("Unauthorized: session is missing or expired")]
    Unauthorized,

    /// The signed-in role may not perform this call.
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A successful envelope that should have carried data did not.
    #[error("Response envelope carried no data")]
    MissingData,

    /// Upload response lacked `url` or `public_id`.
    #[error("Upload response is missing url or public_id")]
    InvalidUpload,

    /// Client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the failure happened on the wire rather than in the application.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !matches!(self, Self::Application { .. } | Self::MissingData | Self::InvalidUpload)
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(err: EnvelopeError) -> Self {
        Self::Application {
            code: err.code,
            message: err.message,
        }
    }
}
