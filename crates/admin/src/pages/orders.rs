//! Orders page.
//!
//! Paginated order table, a single-order detail dialog and deletion with
//! optimistic removal: the row disappears at once and is put back at its
//! old position if the backend refuses.

use std::sync::Arc;

use flashfood_admin_core::{Order, OrderId, OrderStatus};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;

use super::dialog::{DetailDialog, DialogOutcome, DialogSnapshot};
use super::list::{FetchOutcome, PaginatedList};
use super::{PageError, PageSettings, Pagination};
use crate::api::DashboardApi;
use crate::components::data_table::{DataTableConfig, OrderRow, orders_table_config};

/// Order counts shown above the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    /// All orders, across pages.
    pub total: u64,
    /// Delivered orders on the current page.
    pub delivered: usize,
    /// Pending orders on the current page.
    pub pending: usize,
    /// Cancelled orders on the current page.
    pub cancelled: usize,
}

impl OrderStats {
    /// Count the current page by status.
    #[must_use]
    pub fn tally(total: u64, orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total,
            delivered: count(OrderStatus::Delivered),
            pending: count(OrderStatus::Pending),
            cancelled: count(OrderStatus::Cancelled),
        }
    }
}

/// Everything the orders page renders.
#[derive(Debug, Clone, Serialize)]
pub struct OrdersView {
    pub table: DataTableConfig,
    pub rows: Vec<OrderRow>,
    pub pagination: Pagination,
    pub loading: bool,
    pub stats: OrderStats,
    pub details: DialogSnapshot<OrderId, Option<Order>>,
    pub deleting: Option<OrderId>,
}

/// Orders page controller.
pub struct OrdersPage {
    api: Arc<dyn DashboardApi>,
    list: PaginatedList<Order>,
    details: DetailDialog<OrderId, Option<Order>>,
    deleting: RwLock<Option<OrderId>>,
}

impl OrdersPage {
    /// Create the page; rows are empty until [`load`](Self::load) runs.
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, settings: PageSettings) -> Self {
        let list_api = Arc::clone(&api);
        Self {
            api,
            list: PaginatedList::new("orders", settings.page_size, move |request| {
                let api = Arc::clone(&list_api);
                async move { api.orders_page(request).await }.boxed()
            }),
            details: DetailDialog::new("order_details"),
            deleting: RwLock::new(None),
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

    /// Open the detail dialog for one order.
    pub async fn open_details(&self, id: OrderId) -> DialogOutcome {
        let api = Arc::clone(&self.api);
        let order_id = id.clone();
        self.details
            .open(id, async move { api.order(&order_id).await.map(Some) })
            .await
    }

    /// Close the detail dialog.
    pub async fn close_details(&self) {
        self.details.close().await;
    }

    /// Delete an order from the current page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Validation`] if the order is not on the current
    /// page or was already delivered, or [`PageError::Api`] if the backend
    /// refuses. The row is then put back at its old position, unless the
    /// table has been refetched meanwhile.
    pub async fn delete(&self, id: &OrderId) -> Result<(), PageError> {
        let Some(removed) = self.list.remove_where(|order| &order.id == id).await else {
            return Err(PageError::Validation(format!(
                "Order {id} is not on the current page"
            )));
        };
        if removed.item.status == OrderStatus::Delivered {
            self.list.restore(removed).await;
            return Err(PageError::Validation(
                "Delivered orders cannot be deleted".to_string(),
            ));
        }

        *self.deleting.write().await = Some(id.clone());
        let result = self.api.delete_order(id).await;
        *self.deleting.write().await = None;

        if let Err(e) = result {
            tracing::error!(order_id = %id, error = %e, "Failed to delete order, restoring row");
            self.list.restore(removed).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Render the page.
    pub async fn snapshot(&self) -> OrdersView {
        let list = self.list.snapshot().await;

        OrdersView {
            table: orders_table_config(),
            rows: list.items.iter().map(OrderRow::project).collect(),
            pagination: Pagination::from(&list),
            loading: list.loading,
            stats: OrderStats::tally(list.total_items, &list.items),
            details: self.details.snapshot().await,
            deleting: self.deleting.read().await.clone(),
        }
    }
}

impl std::fmt::Debug for OrdersPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
