//! Session extractors for admin routes.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use flashfood_admin_core::AdminRole;

use crate::error::AppError;
use crate::pages::Dashboard;
use crate::state::AppState;

/// Extractor that requires a signed-in operator with mounted pages.
///
/// Rejects with 401 when nobody is signed in or the backend has revoked
/// the session.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireSession(dashboard): RequireSession) -> impl IntoResponse {
///     Json(dashboard.orders.snapshot().await)
/// }
/// ```
pub struct RequireSession(pub Arc<Dashboard>);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .dashboard()
            .await
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))
    }
}

/// Extractor for the signed-in role, if any.
///
/// Unlike [`RequireSession`], this never rejects.
pub struct CurrentRole(pub Option<AdminRole>);

impl FromRequestParts<AppState> for CurrentRole {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.session().role().await))
    }
}
