//! Session context shared by the HTTP client and the sidebar filter.
//!
//! Holds the bearer token and the role the operator signed in as. The API
//! client reads it on every request and clears it when the backend answers
//! 401.

use std::sync::Arc;

use flashfood_admin_core::AdminRole;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

/// An authenticated admin session.
#[derive(Clone)]
pub struct Session {
    /// Bearer token for the backend API.
    pub access_token: SecretString,
    /// Role the operator signed in as.
    pub logged_in_as: AdminRole,
}

impl Session {
    /// Create a session.
    #[must_use]
    pub fn new(access_token: impl Into<String>, logged_in_as: AdminRole) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            logged_in_as,
        }
    }

    /// `Bearer <token>` header value.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("logged_in_as", &self.logged_in_as)
            .finish()
    }
}

/// Cloneable handle to the current session, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Replace the current session.
    pub async fn sign_in(&self, session: Session) {
        *self.inner.write().await = Some(session);
    }

    /// Drop the current session.
    pub async fn clear(&self) {
        if self.inner.write().await.take().is_some() {
            tracing::info!("Admin session cleared");
        }
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    /// Role of the current session.
    pub async fn role(&self) -> Option<AdminRole> {
        self.inner.read().await.as_ref().map(|s| s.logged_in_as)
    }

    /// Whether a session is present.
    pub async fn is_signed_in(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
