//! Customers page.
//!
//! Paginated customer table refreshed by a background poller, a debounced
//! search whose hits replace the table while a query is active, order and
//! complaint history dialogs, and the two-step ban flow.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flashfood_admin_core::{ComplaintHistory, Customer, CustomerId, CustomerStatus, Order};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;

use super::dialog::{DetailDialog, DialogOutcome, DialogSnapshot};
use super::list::{FetchOutcome, PaginatedList};
use super::poller::Poller;
use super::search::DebouncedSearch;
use super::{PageError, PageSettings, Pagination};
use crate::api::DashboardApi;
use crate::components::data_table::{CustomerRow, DataTableConfig, customers_table_config};

/// State of the ban-reason dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BanDialog {
    pub open: bool,
    pub customer_id: Option<CustomerId>,
    pub reason: String,
    pub submitting: bool,
}

/// Status counts over the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub banned: usize,
}

impl CustomerStats {
    /// Count customers by derived status at `now`.
    #[must_use]
    pub fn tally(customers: &[Customer], now: i64) -> Self {
        customers
            .iter()
            .fold(Self::default(), |mut stats, customer| {
                stats.total += 1;
                match customer.status_at(now) {
                    CustomerStatus::Active => stats.active += 1,
                    CustomerStatus::Inactive => stats.inactive += 1,
                    CustomerStatus::Banned => stats.banned += 1,
                }
                stats
            })
    }
}

/// Search box portion of the view.
#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub query: String,
    pub active: bool,
    pub searching: bool,
}

/// Everything the customers page renders.
#[derive(Debug, Clone, Serialize)]
pub struct CustomersView {
    pub table: DataTableConfig,
    pub rows: Vec<CustomerRow>,
    pub pagination: Pagination,
    pub loading: bool,
    pub stats: CustomerStats,
    pub search: SearchView,
    pub order_history: DialogSnapshot<CustomerId, Vec<Order>>,
    pub complaint_history: DialogSnapshot<CustomerId, Vec<ComplaintHistory>>,
    pub ban_dialog: BanDialog,
}

/// Customers page controller.
pub struct CustomersPage {
    api: Arc<dyn DashboardApi>,
    list: Arc<PaginatedList<Customer>>,
    search: DebouncedSearch<Customer>,
    order_history: DetailDialog<CustomerId, Vec<Order>>,
    complaint_history: DetailDialog<CustomerId, Vec<ComplaintHistory>>,
    ban: RwLock<BanDialog>,
    /// Bumped, under the `ban` lock, whenever the ban dialog opens or closes.
    ban_generation: AtomicU64,
    poller: Poller,
}

impl CustomersPage {
    /// Mount the page and start polling the current page.
    ///
    /// Rows are empty until [`load`](Self::load) runs.
    #[must_use]
    pub fn mount(api: Arc<dyn DashboardApi>, settings: PageSettings) -> Self {
        let list_api = Arc::clone(&api);
        let list = Arc::new(PaginatedList::new(
            "customers",
            settings.page_size,
            move |request| {
                let api = Arc::clone(&list_api);
                async move { api.customers_page(request).await }.boxed()
            },
        ));

        let search_api = Arc::clone(&api);
        let search = DebouncedSearch::new("customers", settings.search_debounce, move |query| {
            let api = Arc::clone(&search_api);
            async move { api.search_customers(&query).await }.boxed()
        });

        let polled = Arc::clone(&list);
        let poller = Poller::spawn("customers", settings.poll_interval, move || {
            let list = Arc::clone(&polled);
            async move {
                list.refresh().await;
            }
        });

        Self {
            api,
            list,
            search,
            order_history: DetailDialog::new("customer_orders"),
            complaint_history: DetailDialog::new("customer_complaints"),
            ban: RwLock::new(BanDialog::default()),
            ban_generation: AtomicU64::new(0),
            poller,
        }
    }

    /// Load the current page with the loading indicator.
    pub async fn load(&self) -> FetchOutcome {
        self.list.reload().await
    }

    /// Change page.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        self.list.go_to_page(page).await
    }

    /// Silent refetch of the current page, as a poll tick does.
    pub async fn refresh(&self) -> FetchOutcome {
        self.list.refresh().await
    }

    /// Update the search query.
    pub async fn search(&self, query: &str) {
        self.search.set_query(query).await;
    }

    /// Open the order history dialog for a customer.
    pub async fn open_order_history(&self, id: CustomerId) -> DialogOutcome {
        let api = Arc::clone(&self.api);
        let customer_id = id.clone();
        self.order_history
            .open(id, async move { api.customer_orders(&customer_id).await })
            .await
    }

    /// Open the complaint history dialog for a customer.
    pub async fn open_complaint_history(&self, id: CustomerId) -> DialogOutcome {
        let api = Arc::clone(&self.api);
        let customer_id = id.clone();
        self.complaint_history
            .open(id, async move { api.customer_complaints(&customer_id).await })
            .await
    }

    /// Close both history dialogs.
    pub async fn close_history(&self) {
        self.order_history.close().await;
        self.complaint_history.close().await;
    }

    /// Open the ban dialog for a customer with an empty reason.
    pub async fn open_ban(&self, id: CustomerId) {
        self.replace_ban(BanDialog {
            open: true,
            customer_id: Some(id),
            reason: String::new(),
            submitting: false,
        })
        .await;
    }

    /// Update the reason typed into the ban dialog.
    pub async fn set_ban_reason(&self, reason: &str) {
        reason.clone_into(&mut self.ban.write().await.reason);
    }

    /// Close the ban dialog without banning.
    pub async fn cancel_ban(&self) {
        self.replace_ban(BanDialog::default()).await;
    }

    /// Submit the ban dialog.
    ///
    /// On success the customer is marked banned in place, in both the table
    /// and the search results, without a refetch.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Validation`] if no customer is selected or the
    /// reason is blank (nothing is sent), or [`PageError::Api`] if the
    /// backend call fails (the dialog stays open).
    ///
    /// A dialog opened for someone else while the request was in flight is
    /// left as it is.
    pub async fn submit_ban(&self) -> Result<(), PageError> {
        let (id, reason, generation) = {
            let mut dialog = self.ban.write().await;
            let Some(id) = dialog.customer_id.clone().filter(|_| dialog.open) else {
                return Err(PageError::Validation("No customer selected".to_string()));
            };
            let reason = dialog.reason.trim().to_string();
            if reason.is_empty() {
                return Err(PageError::Validation(
                    "Please provide a reason for banning this customer".to_string(),
                ));
            }
            dialog.submitting = true;
            (id, reason, self.ban_generation.load(Ordering::SeqCst))
        };

        match self.api.ban_customer(&id, &reason).await {
            Ok(()) => {
                let is_target = |customer: &Customer| customer.id == id;
                let mark_banned = |customer: &mut Customer| customer.is_banned = true;
                self.list.update_where(is_target, mark_banned).await;
                self.search.update_where(is_target, mark_banned).await;
                self.with_ban_at(generation, |dialog| *dialog = BanDialog::default())
                    .await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(customer_id = %id, error = %e, "Failed to ban customer");
                self.with_ban_at(generation, |dialog| dialog.submitting = false)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Open the ban dialog for `id`, fill in `reason` and submit.
    ///
    /// # Errors
    ///
    /// See [`submit_ban`](Self::submit_ban).
    pub async fn ban(&self, id: CustomerId, reason: &str) -> Result<(), PageError> {
        self.open_ban(id).await;
        self.set_ban_reason(reason).await;
        self.submit_ban().await
    }

    /// Render the page as of `now` (epoch seconds).
    pub async fn snapshot(&self, now: i64) -> CustomersView {
        let list = self.list.snapshot().await;
        let search = self.search.snapshot().await;

        let displayed = if search.active {
            &search.results
        } else {
            &list.items
        };

        CustomersView {
            table: customers_table_config(),
            rows: displayed
                .iter()
                .map(|customer| CustomerRow::project(customer, now))
                .collect(),
            pagination: Pagination::from(&list),
            loading: list.loading,
            stats: CustomerStats::tally(&list.items, now),
            search: SearchView {
                query: search.query,
                active: search.active,
                searching: search.searching,
            },
            order_history: self.order_history.snapshot().await,
            complaint_history: self.complaint_history.snapshot().await,
            ban_dialog: self.ban.read().await.clone(),
        }
    }
}

impl CustomersPage {
    async fn replace_ban(&self, dialog: BanDialog) {
        let mut guard = self.ban.write().await;
        self.ban_generation.fetch_add(1, Ordering::SeqCst);
        *guard = dialog;
    }

    /// Apply `edit` if the ban dialog is still the one opened as `generation`.
    async fn with_ban_at(&self, generation: u64, edit: impl FnOnce(&mut BanDialog)) {
        let mut guard = self.ban.write().await;
        if self.ban_generation.load(Ordering::SeqCst) == generation {
            edit(&mut guard);
        } else {
            tracing::debug!("Ban dialog replaced while the request was in flight");
        }
    }
}

impl std::fmt::Debug for CustomersPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomersPage")
            .field("list", &self.list)
            .field("poller", &self.poller)
            .finish_non_exhaustive()
    }
}
