//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{ApiClient, ApiError, DashboardApi, Session, SessionStore};
use crate::config::AdminConfig;
use crate::pages::{Dashboard, PageSettings};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the backend client, the session it
/// reads its bearer token from, and the page controllers mounted for the
/// signed-in operator.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    settings: PageSettings,
    session: SessionStore,
    api: Arc<dyn DashboardApi>,
    dashboard: RwLock<Option<Arc<Dashboard>>>,
}

impl AppState {
    /// Create the state with a real backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &AdminConfig) -> Result<Self, ApiError> {
        let session = SessionStore::new();
        let client = ApiClient::new(&config.api_base_url, config.api_timeout, session.clone())?;
        Ok(Self::with_api(config.page_settings(), session, Arc::new(client)))
    }

    /// Create the state over any backend implementation.
    #[must_use]
    pub fn with_api(
        settings: PageSettings,
        session: SessionStore,
        api: Arc<dyn DashboardApi>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                settings,
                session,
                api,
                dashboard: RwLock::new(None),
            }),
        }
    }

    /// Session context shared with the backend client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Page tunables.
    #[must_use]
    pub fn settings(&self) -> PageSettings {
        self.inner.settings
    }

    /// Sign in and mount a fresh set of pages, replacing any previous ones.
    pub async fn mount(&self, session: Session) -> Arc<Dashboard> {
        self.unmount().await;
        self.inner.session.sign_in(session).await;

        let dashboard = Arc::new(
            Dashboard::mount(Arc::clone(&self.inner.api), self.inner.settings).await,
        );
        *self.inner.dashboard.write().await = Some(Arc::clone(&dashboard));
        dashboard
    }

    /// Drop the mounted pages and clear the session.
    pub async fn unmount(&self) {
        let previous = self.inner.dashboard.write().await.take();
        self.inner.session.clear().await;
        drop(previous);
    }

    /// Pages of the signed-in operator.
    ///
    /// When the backend has revoked the session since mounting, the stale
    /// pages are unmounted and `None` is returned.
    pub async fn dashboard(&self) -> Option<Arc<Dashboard>> {
        let dashboard = self.inner.dashboard.read().await.clone()?;
        if self.inner.session.is_signed_in().await {
            return Some(dashboard);
        }
        tracing::info!("Session revoked, unmounting dashboard");
        self.inner.dashboard.write().await.take();
        None
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("settings", &self.inner.settings)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}
