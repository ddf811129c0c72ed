//! Detail dialogs backed by an on-demand fetch.
//!
//! Opening a dialog bumps its generation and starts a fetch for the chosen
//! subject; closing bumps it again. A response commits only if the
//! generation it was issued under is still current, so a late answer for a
//! closed or superseded dialog is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::api::ApiError;

/// What an open did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogOutcome {
    /// Data committed.
    Loaded,
    /// Fetch failed; the dialog shows no data.
    Failed,
    /// Dialog was closed or reopened meanwhile.
    Stale,
}

/// Read-only view of a dialog.
#[derive(Debug, Clone, Serialize)]
pub struct DialogSnapshot<K, T> {
    pub open: bool,
    pub loading: bool,
    pub subject: Option<K>,
    pub data: T,
}

struct DialogState<K, T> {
    open: bool,
    loading: bool,
    subject: Option<K>,
    data: T,
}

/// A dialog showing data fetched for one subject.
pub struct DetailDialog<K, T> {
    name: &'static str,
    state: RwLock<DialogState<K, T>>,
    generation: AtomicU64,
}

impl<K, T> DetailDialog<K, T>
where
    K: Clone + std::fmt::Display + Send + Sync,
    T: Clone + Default + Send + Sync,
{
    /// A closed dialog.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RwLock::new(DialogState {
                open: false,
                loading: false,
                subject: None,
                data: T::default(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Open the dialog for `subject` and load it with `load`.
    pub async fn open<Fut>(&self, subject: K, load: Fut) -> DialogOutcome
    where
        Fut: Future<Output = Result<T, ApiError>> + Send,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.open = true;
            state.loading = true;
            state.subject = Some(subject.clone());
            state.data = T::default();
        }

        let result = load.await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(dialog = self.name, %subject, "Discarding response for closed dialog");
            return DialogOutcome::Stale;
        }
        state.loading = false;

        match result {
            Ok(data) => {
                state.data = data;
                DialogOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!(dialog = self.name, %subject, error = %e, "Failed to load dialog data");
                DialogOutcome::Failed
            }
        }
    }

    /// Close the dialog and forget its data.
    pub async fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.open = false;
        state.loading = false;
        state.subject = None;
        state.data = T::default();
    }

    /// Copy of the dialog state.
    pub async fn snapshot(&self) -> DialogSnapshot<K, T> {
        let state = self.state.read().await;
        DialogSnapshot {
            open: state.open,
            loading: state.loading,
            subject: state.subject.clone(),
            data: state.data.clone(),
        }
    }
}

impl<K, T> std::fmt::Debug for DetailDialog<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailDialog")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
