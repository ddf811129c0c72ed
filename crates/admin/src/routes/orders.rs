//! Orders page routes.

use axum::{Json, extract::Path};
use flashfood_admin_core::OrderId;
use tracing::instrument;

use super::PageBody;
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::pages::OrdersView;

/// GET /orders
#[instrument(skip_all)]
pub async fn index(RequireSession(dashboard): RequireSession) -> Json<OrdersView> {
    Json(dashboard.orders.snapshot().await)
}

/// POST /orders/page
#[instrument(skip(dashboard))]
pub async fn page(
    RequireSession(dashboard): RequireSession,
    Json(body): Json<PageBody>,
) -> Json<OrdersView> {
    dashboard.orders.go_to_page(body.page).await;
    Json(dashboard.orders.snapshot().await)
}

/// POST /orders/{id}/details
#[instrument(skip(dashboard))]
pub async fn details(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<OrderId>,
) -> Json<OrdersView> {
    dashboard.orders.open_details(id).await;
    Json(dashboard.orders.snapshot().await)
}

/// DELETE /orders/details
#[instrument(skip_all)]
pub async fn close_details(RequireSession(dashboard): RequireSession) -> Json<OrdersView> {
    dashboard.orders.close_details().await;
    Json(dashboard.orders.snapshot().await)
}

/// DELETE /orders/{id}
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an order that cannot be deleted, or
/// the backend error after the row has been restored.
#[instrument(skip(dashboard))]
pub async fn delete(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<OrderId>,
) -> Result<Json<OrdersView>, AppError> {
    dashboard.orders.delete(&id).await?;
    Ok(Json(dashboard.orders.snapshot().await))
}
