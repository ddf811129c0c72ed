//! Customer-care team page.

use std::sync::Arc;

use flashfood_admin_core::{CustomerCareId, CustomerCareRep};
use futures::FutureExt;
use serde::Serialize;
use tokio::sync::RwLock;

use super::list::{FetchOutcome, PaginatedList};
use super::{PageError, PageSettings, Pagination};
use crate::api::DashboardApi;
use crate::components::data_table::{
    CustomerCareRow, DataTableConfig, customer_care_table_config,
};

/// Everything the customer-care page renders.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerCareView {
    pub table: DataTableConfig,
    pub rows: Vec<CustomerCareRow>,
    pub pagination: Pagination,
    pub loading: bool,
    /// Representatives with an availability change in flight.
    pub updating: Vec<CustomerCareId>,
}

/// Customer-care page controller.
pub struct CustomerCarePage {
    api: Arc<dyn DashboardApi>,
    list: PaginatedList<CustomerCareRep>,
    updating: RwLock<Vec<CustomerCareId>>,
}

impl CustomerCarePage {
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, settings: PageSettings) -> Self {
        let list_api = Arc::clone(&api);
        Self {
            api,
            list: PaginatedList::new("customer_care", settings.page_size, move |request| {
                let api = Arc::clone(&list_api);
                async move { api.customer_care_page(request).await }.boxed()
            }),
            updating: RwLock::new(Vec::new()),
        }
    }

    pub async fn load(&self) -> FetchOutcome {
        self.list.reload().await
    }

    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        self.list.go_to_page(page).await
    }

    /// Toggle whether a representative takes new work.
    ///
    /// The row is patched locally once the backend accepts the change.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Api`] if the backend rejects the change; the row
    /// is left as it was.
    pub async fn set_availability(
        &self,
        id: &CustomerCareId,
        available_for_work: bool,
    ) -> Result<(), PageError> {
        self.updating.write().await.push(id.clone());
        let result = self
            .api
            .set_customer_care_availability(id, available_for_work)
            .await;
        self.updating.write().await.retain(|pending| pending != id);

        if let Err(e) = result {
            tracing::error!(rep_id = %id, error = %e, "Failed to update availability");
            return Err(e.into());
        }

        self.list
            .update_where(
                |rep| &rep.id == id,
                |rep| rep.available_for_work = available_for_work,
            )
            .await;
        tracing::info!(rep_id = %id, available_for_work, "Availability updated");
        Ok(())
    }

    pub async fn snapshot(&self) -> CustomerCareView {
        let list = self.list.snapshot().await;
        CustomerCareView {
            table: customer_care_table_config(),
            rows: list.items.iter().map(CustomerCareRow::project).collect(),
            pagination: Pagination::from(&list),
            loading: list.loading,
            updating: self.updating.read().await.clone(),
        }
    }
}

impl std::fmt::Debug for CustomerCarePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerCarePage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
