//! Backend response envelope and pagination payloads.
//!
//! Every backend endpoint wraps its payload as `{EC, EM?, data}`. `EC == 0`
//! signals success; any other code is an application error whose message is
//! carried in `EM`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level failure reported inside an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("application error {code}: {}", message.as_deref().unwrap_or("no message"))]
pub struct EnvelopeError {
    /// Non-zero `EC` value.
    pub code: i64,
    /// `EM` value, if the backend sent one.
    pub message: Option<String>,
}

/// The `{EC, EM, data}` response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Error code; zero on success.
    #[serde(rename = "EC")]
    pub code: i64,
    /// Error message.
    #[serde(rename = "EM", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload; absent or `null` on acknowledgements and most failures.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            code: 0,
            message: None,
            data: Some(data),
        }
    }

    /// Failed envelope with the given code and message.
    #[must_use]
    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether `EC == 0`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Unwrap the envelope, yielding the (optional) payload on success.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when `EC` is non-zero.
    pub fn into_result(self) -> Result<Option<T>, EnvelopeError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(EnvelopeError {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_items: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Page number echoed by the backend, when it sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
}

impl<T> Page<T> {
    /// An empty page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 0,
            current_page: None,
        }
    }
}

/// Query parameters for a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page size.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

impl PageRequest {
    /// Create a page request.
    #[must_use]
    pub const fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }
}
