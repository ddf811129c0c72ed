//! Paginated list state shared by every list page.
//!
//! A [`PaginatedList`] owns the rows of the current page plus pagination
//! metadata, and knows how to (re)load them through a page loader. Every
//! fetch is tagged with a generation number; only the most recently issued
//! fetch may commit, so a slow response for an old page can never overwrite
//! a newer one.
//!
//! Failure handling:
//! - `EC != 0` empties the rows (pagination metadata is kept)
//! - transport failures keep the previous rows
//!
//! Neither is surfaced to the operator beyond the log.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flashfood_admin_core::{Page, PageRequest};
use futures::future::BoxFuture;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::api::ApiError;

/// Loads one page from the backend.
pub type PageLoader<T> =
    Arc<dyn Fn(PageRequest) -> BoxFuture<'static, Result<Page<T>, ApiError>> + Send + Sync>;

/// Whether a fetch shows the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    /// User-initiated; sets `loading` while in flight.
    Foreground,
    /// Poll tick or refresh; silent.
    Background,
}

/// What a fetch did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Rows and metadata replaced.
    Committed,
    /// Backend reported an application error; rows cleared.
    Emptied,
    /// Transport failure; rows left as they were.
    Kept,
    /// A newer fetch was issued meanwhile; response discarded.
    Stale,
    /// Requested page was out of range; nothing was sent.
    Ignored,
}

/// Read-only view of a list.
#[derive(Debug, Clone, Serialize)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub loading: bool,
}

struct ListState<T> {
    items: Vec<T>,
    total_items: u64,
    total_pages: u32,
    current_page: u32,
    /// Generation of the foreground fetch that raised `loading`.
    loading: Option<u64>,
    /// Bumped whenever the rows are replaced by a fetch.
    epoch: u64,
}

/// Rows of one paginated listing plus the machinery to fetch them.
pub struct PaginatedList<T> {
    name: &'static str,
    limit: u32,
    loader: PageLoader<T>,
    state: RwLock<ListState<T>>,
    generation: AtomicU64,
}

impl<T> PaginatedList<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty list on page 1.
    pub fn new<F>(name: &'static str, limit: u32, loader: F) -> Self
    where
        F: Fn(PageRequest) -> BoxFuture<'static, Result<Page<T>, ApiError>> + Send + Sync + 'static,
    {
        Self {
            name,
            limit,
            loader: Arc::new(loader),
            state: RwLock::new(ListState {
                items: Vec::new(),
                total_items: 0,
                total_pages: 1,
                current_page: 1,
                loading: None,
                epoch: 0,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Move to `page` and load it.
    ///
    /// Pages outside `1..=total_pages` are ignored without a request.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        self.fetch(Some(page), FetchMode::Foreground).await
    }

    /// Reload the current page with the loading indicator.
    pub async fn reload(&self) -> FetchOutcome {
        self.fetch(None, FetchMode::Foreground).await
    }

    /// Reload the current page silently.
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(None, FetchMode::Background).await
    }

    /// Fetch `target` (or the current page) and commit it if no newer fetch
    /// was issued meanwhile.
    async fn fetch(&self, target: Option<u32>, mode: FetchMode) -> FetchOutcome {
        let Some((page, generation)) = self.begin_fetch(target, mode).await else {
            return FetchOutcome::Ignored;
        };

        let result = (self.loader)(PageRequest::new(self.limit, page)).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            if state.loading == Some(generation) {
                state.loading = None;
            }
            tracing::debug!(list = self.name, page, generation, "Discarding stale page response");
            return FetchOutcome::Stale;
        }
        state.loading = None;

        match result {
            Ok(fetched) => {
                state.items = fetched.items;
                state.total_items = fetched.total_items;
                state.total_pages = fetched.total_pages;
                state.epoch += 1;
                FetchOutcome::Committed
            }
            Err(e) if e.is_transport() => {
                tracing::error!(list = self.name, page, error = %e, "Failed to fetch page");
                FetchOutcome::Kept
            }
            Err(e) => {
                tracing::warn!(list = self.name, page, error = %e, "Backend rejected page fetch");
                state.items.clear();
                state.epoch += 1;
                FetchOutcome::Emptied
            }
        }
    }

    /// Settle which page to request and issue its generation under one
    /// lock, so a page change cannot land between the two.
    async fn begin_fetch(&self, target: Option<u32>, mode: FetchMode) -> Option<(u32, u64)> {
        let mut state = self.state.write().await;
        if let Some(page) = target {
            if page == 0 || page > state.total_pages {
                tracing::debug!(list = self.name, page, total_pages = state.total_pages, "Ignoring out-of-range page");
                return None;
            }
            state.current_page = page;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if mode == FetchMode::Foreground {
            state.loading = Some(generation);
        }
        Some((state.current_page, generation))
    }

    /// Current page number.
    pub async fn current_page(&self) -> u32 {
        self.state.read().await.current_page
    }

    /// Whether a foreground fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading.is_some()
    }

    /// Copy of the current rows.
    pub async fn items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    /// Copy of the whole list state.
    pub async fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.state.read().await;
        ListSnapshot {
            items: state.items.clone(),
            total_items: state.total_items,
            total_pages: state.total_pages,
            current_page: state.current_page,
            loading: state.loading.is_some(),
        }
    }

    /// Apply `update` to every row matching `matches`. Returns how many rows changed.
    pub async fn update_where<P, U>(&self, matches: P, mut update: U) -> usize
    where
        P: Fn(&T) -> bool,
        U: FnMut(&mut T),
    {
        let mut state = self.state.write().await;
        let mut changed = 0;
        for item in state.items.iter_mut().filter(|item| matches(item)) {
            update(item);
            changed += 1;
        }
        changed
    }

    /// Take the first row matching `matches` out of the list.
    pub async fn remove_where<P>(&self, matches: P) -> Option<Removed<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut state = self.state.write().await;
        let index = state.items.iter().position(matches)?;
        Some(Removed {
            index,
            item: state.items.remove(index),
            epoch: state.epoch,
        })
    }

    /// Put a removed row back at its old index.
    ///
    /// Does nothing once the rows have been replaced since the removal (page
    /// change, reload, poll): they already reflect the backend.
    pub async fn restore(&self, removed: Removed<T>) -> bool {
        let mut state = self.state.write().await;
        if state.epoch != removed.epoch {
            tracing::debug!(list = self.name, "Rows replaced since removal, not restoring");
            return false;
        }
        let index = removed.index.min(state.items.len());
        state.items.insert(index, removed.item);
        true
    }
}

/// A row taken out by [`PaginatedList::remove_where`].
#[derive(Debug)]
pub struct Removed<T> {
    pub index: usize,
    pub item: T,
    /// Rows version the row was taken from.
    epoch: u64,
}

impl<T> std::fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedList")
            .field("name", &self.name)
            .field("limit", &self.limit)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use futures::FutureExt;

    use super::*;

    /// Loader returning `page * 10` as the single item, after `page` delays.
    fn numbered_list(
        total_pages: u32,
        delays: Vec<(u32, Duration)>,
        calls: Arc<Mutex<Vec<PageRequest>>>,
    ) -> PaginatedList<u32> {
        PaginatedList::new("numbers", 10, move |request: PageRequest| {
            calls.lock().expect("lock").push(request);
            let delay = delays
                .iter()
                .find(|(page, _)| *page == request.page)
                .map_or(Duration::ZERO, |(_, delay)| *delay);
            async move {
                tokio::time::sleep(delay).await;
                Ok(Page {
                    items: vec![request.page * 10],
                    total_items: u64::from(total_pages) * 10,
                    total_pages,
                    current_page: Some(request.page),
                })
            }
            .boxed()
        })
    }

    /// Loader answering with `responses`, last one first.
    fn scripted_list(responses: Vec<Result<Page<String>, ApiError>>) -> PaginatedList<String> {
        let responses = Arc::new(Mutex::new(responses));
        PaginatedList::new("letters", 10, move |_| {
            let next = responses.lock().expect("lock").pop().expect("response");
            async move { next }.boxed()
        })
    }

    fn letters(items: &[&str]) -> Result<Page<String>, ApiError> {
        Ok(Page {
            items: items.iter().map(|item| (*item).to_string()).collect(),
            total_items: items.len() as u64,
            total_pages: 1,
            current_page: None,
        })
    }

    #[tokio::test]
    async fn test_fetch_commits_items_and_metadata() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let list = numbered_list(5, vec![], Arc::clone(&calls));

        assert_eq!(list.reload().await, FetchOutcome::Committed);

        let snapshot = list.snapshot().await;
        assert_eq!(snapshot.items, vec![10]);
        assert_eq!(snapshot.total_items, 50);
        assert_eq!(snapshot.total_pages, 5);
        assert_eq!(snapshot.current_page, 1);
        assert!(!snapshot.loading);
        assert_eq!(*calls.lock().expect("lock"), vec![PageRequest::new(10, 1)]);
    }

    #[tokio::test]
    async fn test_out_of_range_pages_are_ignored() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let list = numbered_list(5, vec![], Arc::clone(&calls));
        list.reload().await;
        calls.lock().expect("lock").clear();

        assert_eq!(list.go_to_page(0).await, FetchOutcome::Ignored);
        assert_eq!(list.go_to_page(6).await, FetchOutcome::Ignored);
        assert_eq!(list.current_page().await, 1);
        assert!(calls.lock().expect("lock").is_empty());

        assert_eq!(list.go_to_page(5).await, FetchOutcome::Committed);
        assert_eq!(list.current_page().await, 5);
        assert_eq!(list.items().await, vec![50]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_commits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let list = numbered_list(
            5,
            vec![
                (2, Duration::from_millis(500)),
                (3, Duration::from_millis(10)),
            ],
            calls,
        );
        list.reload().await;

        let (slow, fast) = tokio::join!(list.go_to_page(2), list.go_to_page(3));

        assert_eq!(slow, FetchOutcome::Stale);
        assert_eq!(fast, FetchOutcome::Committed);
        assert_eq!(list.items().await, vec![30]);
        assert!(!list.is_loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_racing_a_page_change_requests_the_page_it_commits() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let list = numbered_list(5, vec![(2, Duration::from_millis(50))], Arc::clone(&calls));
        list.reload().await;
        calls.lock().expect("lock").clear();

        let (page_change, tick) = tokio::join!(list.go_to_page(2), list.refresh());

        // Whichever fetch was issued last decides the rows, and it asked for
        // the page the list is on.
        assert_eq!(page_change, FetchOutcome::Stale);
        assert_eq!(tick, FetchOutcome::Committed);
        assert_eq!(list.current_page().await, 2);
        assert_eq!(list.items().await, vec![20]);
        assert_eq!(
            *calls.lock().expect("lock"),
            vec![PageRequest::new(10, 2), PageRequest::new(10, 2)]
        );
    }

    #[tokio::test]
    async fn test_application_error_empties_and_transport_error_keeps() {
        let list = scripted_list(vec![
            letters(&["kept"]),
            Err(ApiError::Status {
                status: 502,
                body: String::new(),
            }),
            Err(ApiError::Application {
                code: 1,
                message: None,
            }),
            letters(&["a", "b"]),
        ]);

        assert_eq!(list.refresh().await, FetchOutcome::Committed);
        assert_eq!(list.refresh().await, FetchOutcome::Emptied);
        assert!(list.items().await.is_empty());
        assert_eq!(list.snapshot().await.total_items, 2);

        assert_eq!(list.refresh().await, FetchOutcome::Kept);
        assert!(list.items().await.is_empty());
        assert_eq!(list.refresh().await, FetchOutcome::Committed);
        assert_eq!(list.items().await, vec!["kept".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_and_restore_preserve_position() {
        let list = scripted_list(vec![letters(&["a", "b", "c"])]);
        list.reload().await;

        let removed = list.remove_where(|v| v == "b").await.expect("present");
        assert_eq!((removed.index, removed.item.as_str()), (1, "b"));
        assert_eq!(list.items().await, vec!["a", "c"]);

        assert!(list.restore(removed).await);
        assert_eq!(list.items().await, vec!["a", "b", "c"]);
        assert_eq!(list.update_where(|v| v != "a", |v| v.push('!')).await, 2);
        assert_eq!(list.items().await, vec!["a", "b!", "c!"]);
    }

    #[tokio::test]
    async fn test_removed_row_is_not_restored_into_replaced_rows() {
        let list = scripted_list(vec![letters(&["d", "e"]), letters(&["a", "b", "c"])]);
        list.reload().await;
        let removed = list.remove_where(|v| v == "c").await.expect("present");

        assert_eq!(list.reload().await, FetchOutcome::Committed);

        assert!(!list.restore(removed).await);
        assert_eq!(list.items().await, vec!["d", "e"]);
    }
}
