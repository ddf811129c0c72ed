//! Customer endpoints.

use flashfood_admin_core::{
    ComplaintHistory, Customer, CustomerId, Order, Page, PageRequest, UserSearchResults,
};
use serde::Serialize;
use tracing::instrument;

use super::client::page_query;
use super::{ApiClient, ApiError};

/// Body of a ban request.
#[derive(Debug, Serialize)]
struct BanRequest<'a> {
    reason: &'a str,
}

impl ApiClient {
    /// Fetch one page of customers.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(page = request.page, limit = request.limit))]
    pub async fn list_customers(&self, request: PageRequest) -> Result<Page<Customer>, ApiError> {
        let page = self
            .get("customers/paginated", &page_query(request))
            .await?;
        Ok(page.unwrap_or_else(Page::empty))
    }

    /// Search customers by free-text query.
    ///
    /// Hits are converted into [`Customer`] rows; search results never carry
    /// a ban flag.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self))]
    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ApiError> {
        let results: Option<UserSearchResults> = self
            .get(
                "users/search",
                &[("query", query.to_string()), ("type", "customer".to_string())],
            )
            .await?;

        Ok(results
            .unwrap_or_default()
            .results
            .into_iter()
            .map(Customer::from)
            .collect())
    }

    /// Order history of one customer.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn customer_orders(&self, id: &CustomerId) -> Result<Vec<Order>, ApiError> {
        let path = format!("customers/{id}/orders");
        Ok(self.get(&path, &[]).await?.unwrap_or_default())
    }

    /// Complaint history of one customer.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn customer_complaints(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<ComplaintHistory>, ApiError> {
        let path = format!("customers/{id}/complaints");
        Ok(self.get(&path, &[]).await?.unwrap_or_default())
    }

    /// Ban a customer with the given reason.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self, reason), fields(customer_id = %id))]
    pub async fn ban_customer(&self, id: &CustomerId, reason: &str) -> Result<(), ApiError> {
        let path = format!("admin/ban/Customer/{id}");
        let _: Option<serde_json::Value> = self.post(&path, &BanRequest { reason }).await?;
        tracing::info!(customer_id = %id, "Customer banned");
        Ok(())
    }
}
