//! Customers page routes.

use axum::{
    Json,
    extract::Path,
};
use flashfood_admin_core::CustomerId;
use serde::Deserialize;
use tracing::instrument;

use super::PageBody;
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::pages::{CustomersView, Dashboard, now_epoch_secs};

/// Body of `POST /customers/search`.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
}

/// Body of `POST /customers/{id}/ban`.
#[derive(Debug, Deserialize)]
pub struct BanBody {
    #[serde(default)]
    pub reason: String,
}

async fn view(dashboard: &Dashboard) -> Json<CustomersView> {
    Json(dashboard.customers.snapshot(now_epoch_secs()).await)
}

/// GET /customers
#[instrument(skip_all)]
pub async fn index(RequireSession(dashboard): RequireSession) -> Json<CustomersView> {
    view(&dashboard).await
}

/// POST /customers/page
#[instrument(skip(dashboard))]
pub async fn page(
    RequireSession(dashboard): RequireSession,
    Json(body): Json<PageBody>,
) -> Json<CustomersView> {
    dashboard.customers.go_to_page(body.page).await;
    view(&dashboard).await
}

/// POST /customers/search
///
/// Returns at once; results land after the debounce period.
#[instrument(skip(dashboard))]
pub async fn search(
    RequireSession(dashboard): RequireSession,
    Json(body): Json<SearchBody>,
) -> Json<CustomersView> {
    dashboard.customers.search(&body.query).await;
    view(&dashboard).await
}

/// POST /customers/{id}/orders
#[instrument(skip(dashboard))]
pub async fn order_history(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<CustomerId>,
) -> Json<CustomersView> {
    dashboard.customers.open_order_history(id).await;
    view(&dashboard).await
}

/// POST /customers/{id}/complaints
#[instrument(skip(dashboard))]
pub async fn complaint_history(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<CustomerId>,
) -> Json<CustomersView> {
    dashboard.customers.open_complaint_history(id).await;
    view(&dashboard).await
}

/// DELETE /customers/dialogs
#[instrument(skip_all)]
pub async fn close_dialogs(RequireSession(dashboard): RequireSession) -> Json<CustomersView> {
    dashboard.customers.close_history().await;
    view(&dashboard).await
}

/// POST /customers/{id}/ban
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a blank reason, or the backend error
/// if the ban is rejected.
#[instrument(skip(dashboard))]
pub async fn ban(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<CustomerId>,
    Json(body): Json<BanBody>,
) -> Result<Json<CustomersView>, AppError> {
    dashboard.customers.ban(id, &body.reason).await?;
    Ok(view(&dashboard).await)
}
