//! Sidebar menu filtered by the operator's role.
//!
//! One static master tree holds every entry. Each role is described by a
//! row of [`ROLE_MENUS`]: the leaf keys it may see and the groups whose
//! children are spliced into the parent level. [`menu_for`] applies that
//! row to the master tree; nothing else is role specific.

use flashfood_admin_core::AdminRole;
use serde::Serialize;

/// An entry of the master tree.
#[derive(Debug, Clone, Copy)]
pub enum MenuNode {
    Link {
        key: &'static str,
        title: &'static str,
        link: &'static str,
    },
    Group {
        key: &'static str,
        title: &'static str,
        children: &'static [MenuNode],
    },
}

/// A rendered sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MenuItem {
    Link {
        title: &'static str,
        link: &'static str,
    },
    Group {
        title: &'static str,
        children: Vec<MenuItem>,
    },
}

/// What one role sees.
#[derive(Debug, Clone, Copy)]
pub struct RoleMenu {
    pub role: AdminRole,
    /// Leaf keys kept in the menu.
    pub allowed: &'static [&'static str],
    /// Group keys replaced by their children.
    pub flatten: &'static [&'static str],
}

pub const MASTER_MENU: &[MenuNode] = &[
    MenuNode::Link {
        key: "dashboard",
        title: "Dashboard",
        link: "/",
    },
    MenuNode::Link {
        key: "customers_statistics",
        title: "Customers Statistics",
        link: "/customers",
    },
    MenuNode::Link {
        key: "drivers_statistics",
        title: "Drivers Statistics",
        link: "/drivers",
    },
    MenuNode::Link {
        key: "restaurant_owner_statistics",
        title: "Restaurant Owner Statistics",
        link: "/restaurant-owners",
    },
    MenuNode::Group {
        key: "customer_care_team",
        title: "Customer Care Team",
        children: &[
            MenuNode::Link {
                key: "customer_care_statistics",
                title: "Customer Care Statistics",
                link: "/cc",
            },
            MenuNode::Link {
                key: "customer_care_reports",
                title: "Customer Care Reports",
                link: "/cc/inquiries",
            },
        ],
    },
    MenuNode::Link {
        key: "orders_statistics",
        title: "Orders Statistics",
        link: "/orders",
    },
    MenuNode::Group {
        key: "app_managers",
        title: "App Managers",
        children: &[
            MenuNode::Link {
                key: "service_fee",
                title: "Manage Service fee",
                link: "/manage/service-fee",
            },
            MenuNode::Link {
                key: "notifications",
                title: "Manage Notifications",
                link: "/manage/notifications",
            },
            MenuNode::Link {
                key: "balance_activity",
                title: "Balance Activity",
                link: "/manage/balance-activity",
            },
            MenuNode::Link {
                key: "faqs",
                title: "Manage FAQs",
                link: "/manage/faqs",
            },
        ],
    },
    MenuNode::Link {
        key: "admin_management",
        title: "Admin Management",
        link: "/admin",
    },
    MenuNode::Link {
        key: "orders",
        title: "Orders",
        link: "/orders",
    },
    MenuNode::Link {
        key: "settings",
        title: "Settings",
        link: "/settings",
    },
];

pub const ROLE_MENUS: &[RoleMenu] = &[
    RoleMenu {
        role: AdminRole::SuperAdmin,
        allowed: &[
            "dashboard",
            "customers_statistics",
            "drivers_statistics",
            "restaurant_owner_statistics",
            "customer_care_statistics",
            "customer_care_reports",
            "orders_statistics",
            "service_fee",
            "notifications",
            "balance_activity",
            "faqs",
            "admin_management",
        ],
        flatten: &[],
    },
    RoleMenu {
        role: AdminRole::CompanionAdmin,
        allowed: &[
            "dashboard",
            "drivers_statistics",
            "restaurant_owner_statistics",
            "customer_care_statistics",
            "customer_care_reports",
            "orders_statistics",
            "faqs",
        ],
        flatten: &[],
    },
    RoleMenu {
        role: AdminRole::FinanceAdmin,
        allowed: &["dashboard", "service_fee", "balance_activity"],
        flatten: &["app_managers"],
    },
    RoleMenu {
        role: AdminRole::CustomerCareRepresentative,
        allowed: &["dashboard", "orders", "settings"],
        flatten: &[],
    },
];

/// Sidebar for a role; no role means an empty menu.
#[must_use]
pub fn menu_for(role: Option<AdminRole>) -> Vec<MenuItem> {
    role.and_then(|role| ROLE_MENUS.iter().find(|menu| menu.role == role))
        .map(|menu| filter(MASTER_MENU, menu))
        .unwrap_or_default()
}

/// Apply a role row to a tree.
#[must_use]
pub fn filter(nodes: &[MenuNode], menu: &RoleMenu) -> Vec<MenuItem> {
    let mut items = Vec::new();
    for node in nodes {
        match *node {
            MenuNode::Link { key, title, link } => {
                if menu.allowed.contains(&key) {
                    items.push(MenuItem::Link { title, link });
                }
            }
            MenuNode::Group {
                key,
                title,
                children,
            } => {
                let children = filter(children, menu);
                if children.is_empty() {
                    continue;
                }
                if menu.flatten.contains(&key) {
                    items.extend(children);
                } else {
                    items.push(MenuItem::Group { title, children });
                }
            }
        }
    }
    items
}

/// Every link in a filtered menu, depth first.
#[must_use]
pub fn valid_routes(menu: &[MenuItem]) -> Vec<&'static str> {
    let mut routes = Vec::new();
    for item in menu {
        match item {
            MenuItem::Link { link, .. } => routes.push(*link),
            MenuItem::Group { children, .. } => routes.extend(valid_routes(children)),
        }
    }
    routes
}

/// Where a signed-in operator lands.
#[must_use]
pub fn landing_route(menu: &[MenuItem]) -> Option<&'static str> {
    valid_routes(menu).into_iter().next()
}
