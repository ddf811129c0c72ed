//! Customer-care team endpoints.

use flashfood_admin_core::{CustomerCareId, CustomerCareRep, Page, PageRequest};
use serde::Serialize;
use tracing::instrument;

use super::client::page_query;
use super::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
struct AvailabilityRequest {
    available_for_work: bool,
}

impl ApiClient {
    /// Fetch one page of customer-care representatives.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(page = request.page, limit = request.limit))]
    pub async fn list_customer_care(
        &self,
        request: PageRequest,
    ) -> Result<Page<CustomerCareRep>, ApiError> {
        let page = self
            .get("customer-cares/paginated", &page_query(request))
            .await?;
        Ok(page.unwrap_or_else(Page::empty))
    }

    /// Mark a representative as available or unavailable for work.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend reports `EC != 0`.
    #[instrument(skip(self), fields(rep_id = %id))]
    pub async fn set_customer_care_availability(
        &self,
        id: &CustomerCareId,
        available_for_work: bool,
    ) -> Result<(), ApiError> {
        let path = format!("customer-cares/{id}/status");
        let _: Option<serde_json::Value> = self
            .patch(&path, &AvailabilityRequest { available_for_work })
            .await?;
        Ok(())
    }
}
