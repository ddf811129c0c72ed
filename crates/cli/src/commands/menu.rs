//! Sidebar menu command.

use flashfood_admin::navigation::{menu_for, valid_routes};
use flashfood_admin_core::AdminRole;
use serde_json::json;

use super::{CliError, print_json};

/// Print the menu and reachable routes for `role`.
pub fn show(role: AdminRole) -> Result<(), CliError> {
    let menu = menu_for(Some(role));
    print_json(&json!({
        "role": role,
        "menu": menu,
        "valid_routes": valid_routes(&menu),
    }))
}
