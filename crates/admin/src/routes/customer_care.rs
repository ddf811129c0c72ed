//! Customer-care team routes.

use axum::{Json, extract::Path};
use flashfood_admin_core::CustomerCareId;
use serde::Deserialize;
use tracing::instrument;

use super::PageBody;
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::pages::CustomerCareView;

#[derive(Debug, Deserialize)]
pub struct AvailabilityBody {
    pub available_for_work: bool,
}

/// GET /customer-care
#[instrument(skip_all)]
pub async fn index(RequireSession(dashboard): RequireSession) -> Json<CustomerCareView> {
    Json(dashboard.customer_care.snapshot().await)
}

/// POST /customer-care/page
#[instrument(skip(dashboard))]
pub async fn page(
    RequireSession(dashboard): RequireSession,
    Json(body): Json<PageBody>,
) -> Json<CustomerCareView> {
    dashboard.customer_care.go_to_page(body.page).await;
    Json(dashboard.customer_care.snapshot().await)
}

/// POST /customer-care/{id}/availability
///
/// # Errors
///
/// Returns the backend error if the change is rejected.
#[instrument(skip(dashboard))]
pub async fn availability(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<CustomerCareId>,
    Json(body): Json<AvailabilityBody>,
) -> Result<Json<CustomerCareView>, AppError> {
    dashboard
        .customer_care
        .set_availability(&id, body.available_for_work)
        .await?;
    Ok(Json(dashboard.customer_care.snapshot().await))
}
