//! Sidebar menu route.

use axum::Json;
use flashfood_admin_core::AdminRole;
use serde::Serialize;
use tracing::instrument;

use crate::middleware::CurrentRole;
use crate::navigation::{MenuItem, landing_route, menu_for, valid_routes};

/// Sidebar for the signed-in role.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub logged_in_as: Option<AdminRole>,
    pub menu: Vec<MenuItem>,
    pub valid_routes: Vec<&'static str>,
    pub landing_route: Option<&'static str>,
}

impl NavigationView {
    #[must_use]
    pub fn for_role(role: Option<AdminRole>) -> Self {
        let menu = menu_for(role);
        Self {
            logged_in_as: role,
            valid_routes: valid_routes(&menu),
            landing_route: landing_route(&menu),
            menu,
        }
    }
}

/// GET /navigation
#[instrument(skip_all)]
pub async fn show(CurrentRole(role): CurrentRole) -> Json<NavigationView> {
    Json(NavigationView::for_role(role))
}
