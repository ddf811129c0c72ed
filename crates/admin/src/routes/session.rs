//! Sign-in and sign-out.
//!
//! The backend issues the token; this surface only records it, mounts the
//! page controllers and reports the sidebar for the role.

use axum::{Json, extract::State, http::StatusCode};
use flashfood_admin_core::AdminRole;
use serde::Deserialize;
use tracing::instrument;

use super::navigation::NavigationView;
use crate::api::Session;
use crate::error::{AppError, clear_sentry_role, set_sentry_role};
use crate::state::AppState;

/// Body of `POST /session`.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub access_token: String,
    pub logged_in_as: AdminRole,
}

/// POST /session
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the token is blank.
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<NavigationView>, AppError> {
    if request.access_token.trim().is_empty() {
        return Err(AppError::BadRequest("access_token is required".to_string()));
    }

    let role = request.logged_in_as;
    state.mount(Session::new(request.access_token, role)).await;
    set_sentry_role(role.as_str());
    tracing::info!(%role, "Operator signed in");

    Ok(Json(NavigationView::for_role(Some(role))))
}

/// DELETE /session
#[instrument(skip_all)]
pub async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.unmount().await;
    clear_sentry_role();
    StatusCode::NO_CONTENT
}
