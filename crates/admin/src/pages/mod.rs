//! Page controllers.
//!
//! Each controller owns the client-side state of one dashboard page: the
//! paginated rows, dialogs, drafts and any background tasks. A controller
//! lives from mount to unmount; dropping it aborts its poll and search
//! tasks. State is guarded by `tokio::sync` locks that are never held
//! across a backend call.

pub mod customer_care;
pub mod customers;
pub mod dialog;
pub mod faqs;
pub mod list;
pub mod orders;
pub mod poller;
pub mod search;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::api::{ApiError, DashboardApi};

pub use customer_care::{CustomerCarePage, CustomerCareView};
pub use customers::{CustomersPage, CustomersView};
pub use faqs::{FaqsPage, FaqsView};
pub use list::{FetchOutcome, ListSnapshot, PaginatedList, Removed};
pub use orders::{OrdersPage, OrdersView};

/// Errors surfaced by page actions.
#[derive(Debug, Error)]
pub enum PageError {
    /// Input rejected before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The action needs an open FAQ editor.
    #[error("No FAQ draft is open")]
    NoDraft,

    /// The dialog or draft the action started from was closed or replaced
    /// before the backend answered.
    #[error("The form was closed or replaced while the request was in flight")]
    Superseded,

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Tunables shared by the page controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    /// Rows per page.
    pub page_size: u32,
    /// Customers page poll period.
    pub poll_interval: Duration,
    /// Quiet period before a search is sent.
    pub search_debounce: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            poll_interval: Duration::from_secs(30),
            search_debounce: Duration::from_millis(300),
        }
    }
}

/// Pagination block of a page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> From<&ListSnapshot<T>> for Pagination {
    fn from(snapshot: &ListSnapshot<T>) -> Self {
        Self {
            current_page: snapshot.current_page,
            total_pages: snapshot.total_pages,
            total_items: snapshot.total_items,
        }
    }
}

/// Every page controller of one signed-in session.
///
/// Dropping the dashboard unmounts all pages.
#[derive(Debug)]
pub struct Dashboard {
    pub customers: CustomersPage,
    pub orders: OrdersPage,
    pub faqs: FaqsPage,
    pub customer_care: CustomerCarePage,
}

impl Dashboard {
    /// Mount every page and load its first page of rows.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn mount(api: Arc<dyn DashboardApi>, settings: PageSettings) -> Self {
        let dashboard = Self {
            customers: CustomersPage::mount(Arc::clone(&api), settings),
            orders: OrdersPage::new(Arc::clone(&api), settings),
            faqs: FaqsPage::new(Arc::clone(&api), settings),
            customer_care: CustomerCarePage::new(api, settings),
        };

        tokio::join!(
            dashboard.customers.load(),
            dashboard.orders.load(),
            dashboard.faqs.load(),
            dashboard.customer_care.load(),
        );
        tracing::info!("Dashboard pages mounted");
        dashboard
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        tracing::info!("Dashboard pages unmounted");
    }
}

/// Current wall-clock time in epoch seconds.
#[must_use]
pub fn now_epoch_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
pub(crate) mod fake;
