//! Debounced free-text search.
//!
//! Each keystroke cancels the pending search and schedules a new one after
//! a quiet period. A request already sent is left to finish; every keystroke
//! bumps a sequence number and a response commits only while its sequence is
//! still the latest, so the results on screen always belong to the last
//! thing typed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::api::ApiError;

/// Runs one search against the backend.
pub type SearchFn<T> =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<Vec<T>, ApiError>> + Send + Sync>;

/// Read-only view of a search box.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSnapshot<T> {
    pub query: String,
    pub active: bool,
    pub searching: bool,
    pub results: Vec<T>,
}

struct SearchState<T> {
    query: String,
    results: Vec<T>,
    searching: bool,
}

/// One scheduled search.
struct SearchTask {
    handle: JoinHandle<()>,
    /// Set once the quiet period is over and the request goes out.
    sent: Arc<AtomicBool>,
}

/// Search box state with debounce and stale-response protection.
pub struct DebouncedSearch<T> {
    name: &'static str,
    quiet_period: Duration,
    search: SearchFn<T>,
    state: Arc<RwLock<SearchState<T>>>,
    sequence: Arc<AtomicU64>,
    tasks: Mutex<Vec<SearchTask>>,
}

impl<T> DebouncedSearch<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle search box.
    pub fn new<F>(name: &'static str, quiet_period: Duration, search: F) -> Self
    where
        F: Fn(String) -> BoxFuture<'static, Result<Vec<T>, ApiError>> + Send + Sync + 'static,
    {
        Self {
            name,
            quiet_period,
            search: Arc::new(search),
            state: Arc::new(RwLock::new(SearchState {
                query: String::new(),
                results: Vec::new(),
                searching: false,
            })),
            sequence: Arc::new(AtomicU64::new(0)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Handle a change of the query text.
    ///
    /// A blank query clears the results at once without a request.
    pub async fn set_query(&self, query: &str) {
        let mut tasks = self.tasks.lock().await;
        tasks.retain(|task| {
            if task.sent.load(Ordering::SeqCst) {
                return !task.handle.is_finished();
            }
            task.handle.abort();
            false
        });
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            query.clone_into(&mut state.query);
            if query.trim().is_empty() {
                state.results.clear();
                state.searching = false;
                return;
            }
        }

        let name = self.name;
        let quiet_period = self.quiet_period;
        let search = Arc::clone(&self.search);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.sequence);
        let query = query.to_string();
        let sent = Arc::new(AtomicBool::new(false));
        let mark_sent = Arc::clone(&sent);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            if latest.load(Ordering::SeqCst) != sequence {
                return;
            }
            mark_sent.store(true, Ordering::SeqCst);
            state.write().await.searching = true;

            let result = search(query.clone()).await;

            let mut state = state.write().await;
            if latest.load(Ordering::SeqCst) != sequence {
                tracing::debug!(search = name, %query, "Discarding stale search response");
                return;
            }
            state.searching = false;
            match result {
                Ok(results) => state.results = results,
                Err(e) => {
                    tracing::warn!(search = name, %query, error = %e, "Search failed");
                    state.results.clear();
                }
            }
        });
        tasks.push(SearchTask { handle, sent });
    }

    /// Apply `update` to every result matching `matches`.
    pub async fn update_where<P, U>(&self, matches: P, mut update: U) -> usize
    where
        P: Fn(&T) -> bool,
        U: FnMut(&mut T),
    {
        let mut state = self.state.write().await;
        let mut changed = 0;
        for result in state.results.iter_mut().filter(|result| matches(result)) {
            update(result);
            changed += 1;
        }
        changed
    }

    /// Copy of the search state.
    pub async fn snapshot(&self) -> SearchSnapshot<T> {
        let state = self.state.read().await;
        SearchSnapshot {
            query: state.query.clone(),
            active: !state.query.trim().is_empty(),
            searching: state.searching,
            results: state.results.clone(),
        }
    }
}

impl<T> Drop for DebouncedSearch<T> {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for DebouncedSearch<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedSearch")
            .field("name", &self.name)
            .field("quiet_period", &self.quiet_period)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use futures::FutureExt;

    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    /// Search that echoes the query after `latency`, recording every call.
    fn echo_search(
        latency: fn(&str) -> Duration,
        calls: Arc<StdMutex<Vec<String>>>,
    ) -> DebouncedSearch<String> {
        DebouncedSearch::new("test", QUIET, move |query: String| {
            calls.lock().expect("lock").push(query.clone());
            let delay = latency(&query);
            async move {
                tokio::time::sleep(delay).await;
                Ok(vec![format!("hit:{query}")])
            }
            .boxed()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_a_call() {
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let search = echo_search(|_| Duration::ZERO, Arc::clone(&calls));

        search.set_query("pho").await;
        tokio::time::sleep(QUIET * 2).await;
        assert_eq!(search.snapshot().await.results, vec!["hit:pho".to_string()]);

        search.set_query("   ").await;
        let snapshot = search.snapshot().await;
        assert!(snapshot.results.is_empty());
        assert!(!snapshot.active);

        tokio::time::sleep(QUIET * 2).await;
        assert_eq!(*calls.lock().expect("lock"), vec!["pho".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_call_before_quiet_period_and_retyping_cancels() {
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let search = echo_search(|_| Duration::ZERO, Arc::clone(&calls));

        search.set_query("ph").await;
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().expect("lock").is_empty());

        search.set_query("pho").await;
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().expect("lock").is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*calls.lock().expect("lock"), vec!["pho".to_string()]);
        assert_eq!(search.snapshot().await.results, vec!["hit:pho".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_search_response_never_commits() {
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let search = echo_search(
            |query| {
                if query == "slow" {
                    Duration::from_secs(5)
                } else {
                    Duration::ZERO
                }
            },
            Arc::clone(&calls),
        );

        search.set_query("slow").await;
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        assert!(search.snapshot().await.searching);

        // The slow request is in flight and keeps running; only its
        // sequence number keeps it from landing after the newer one.
        search.set_query("fast").await;
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        assert_eq!(search.snapshot().await.results, vec!["hit:fast".to_string()]);

        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = search.snapshot().await;
        assert_eq!(snapshot.query, "fast");
        assert_eq!(snapshot.results, vec!["hit:fast".to_string()]);
        assert!(!snapshot.searching);
        assert_eq!(
            *calls.lock().expect("lock"),
            vec!["slow".to_string(), "fast".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_discards_in_flight_response() {
        let calls = Arc::new(StdMutex::new(Vec::new()));
        let search = echo_search(|_| Duration::from_secs(5), Arc::clone(&calls));

        search.set_query("slow").await;
        tokio::time::sleep(QUIET + Duration::from_millis(10)).await;
        search.set_query("  ").await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        let snapshot = search.snapshot().await;
        assert!(snapshot.results.is_empty());
        assert!(!snapshot.searching);
        assert_eq!(*calls.lock().expect("lock"), vec!["slow".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_clears_results() {
        let failing = Arc::new(StdMutex::new(false));
        let flag = Arc::clone(&failing);
        let search = DebouncedSearch::new("test", QUIET, move |query: String| {
            let fail = *flag.lock().expect("lock");
            async move {
                if fail {
                    Err(ApiError::Application {
                        code: 1,
                        message: None,
                    })
                } else {
                    Ok(vec![query])
                }
            }
            .boxed()
        });

        search.set_query("bun").await;
        tokio::time::sleep(QUIET * 2).await;
        assert_eq!(search.snapshot().await.results.len(), 1);

        *failing.lock().expect("lock") = true;
        search.set_query("bun bo").await;
        tokio::time::sleep(QUIET * 2).await;
        assert!(search.snapshot().await.results.is_empty());
    }
}
