//! Data table component types.
//!
//! Column configuration for the dashboard tables plus the projections that
//! turn backend entities into display rows.

use flashfood_admin_core::{
    Customer, CustomerCareId, CustomerCareRep, CustomerId, CustomerStatus, Faq, FaqId, Order,
    OrderId, OrderStatus,
};
use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Search placeholder text, for tables with a search box.
    pub search_placeholder: Option<String>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            search_placeholder: None,
            empty_title: "No results.".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = Some(placeholder.to_string());
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Get default visible columns.
    #[must_use]
    pub fn default_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible)
            .map(|c| c.key.clone())
            .collect()
    }
}

/// Placeholder for empty cells.
const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Customers
// =============================================================================

/// Build the customers table configuration.
#[must_use]
pub fn customers_table_config() -> DataTableConfig {
    DataTableConfig::new("customers")
        .column(TableColumn::sortable("email", "Email"))
        .column(TableColumn::sortable("name", "Name"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("actions", "Actions"))
        .search_placeholder("Search")
        .empty_state("No results.", None)
}

/// One customers table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRow {
    pub id: CustomerId,
    pub email: String,
    pub avatar_url: Option<String>,
    pub name: String,
    pub status: CustomerStatus,
    pub status_label: &'static str,
    pub actions: Vec<&'static str>,
}

impl CustomerRow {
    /// Project a customer as of `now` (epoch seconds).
    #[must_use]
    pub fn project(customer: &Customer, now: i64) -> Self {
        let status = customer.status_at(now);
        let mut actions = vec!["view_orders", "view_complaints"];
        if status != CustomerStatus::Banned {
            actions.push("ban");
        }

        Self {
            id: customer.id.clone(),
            email: customer.login_email().to_string(),
            avatar_url: customer
                .avatar
                .as_ref()
                .filter(|avatar| !avatar.is_empty())
                .map(|avatar| avatar.url.clone()),
            name: customer.full_name(),
            status,
            status_label: status.label(),
            actions,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    DataTableConfig::new("orders")
        .column(TableColumn::sortable("id", "Order ID"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::sortable("total_amount", "Total Amount"))
        .column(TableColumn::sortable("order_time", "Order Time"))
        .column(TableColumn::new("actions", "Actions"))
        .empty_state("No results.", None)
}

/// One orders table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub id: OrderId,
    pub status: String,
    pub total_amount: String,
    pub order_time: String,
    pub actions: Vec<&'static str>,
}

impl OrderRow {
    /// Project an order.
    ///
    /// Delivered orders cannot be deleted.
    #[must_use]
    pub fn project(order: &Order) -> Self {
        let mut actions = vec!["view"];
        if order.status != OrderStatus::Delivered {
            actions.push("delete");
        }

        Self {
            id: order.id.clone(),
            status: order.status.to_string(),
            total_amount: order.total_amount.display(),
            order_time: order
                .order_time
                .map_or_else(|| NOT_AVAILABLE.to_string(), |at| at.exact_label()),
            actions,
        }
    }
}

// =============================================================================
// FAQs
// =============================================================================

/// Build the FAQs table configuration.
#[must_use]
pub fn faqs_table_config() -> DataTableConfig {
    DataTableConfig::new("faqs")
        .column(TableColumn::sortable("question", "Question"))
        .column(TableColumn::new("target_user", "Target Users"))
        .column(TableColumn::new("type", "Type"))
        .column(TableColumn::sortable("created_at", "Created At"))
        .column(TableColumn::new("status", "Status").visible(false))
        .column(TableColumn::new("actions", "Actions"))
        .empty_state("No FAQs found.", Some("Add the first one with the editor."))
}

/// One FAQs table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqRow {
    pub id: FaqId,
    pub question: String,
    pub target_user: String,
    #[serde(rename = "type")]
    pub faq_type: &'static str,
    pub status: &'static str,
    pub created_at: String,
    pub actions: Vec<&'static str>,
}

impl FaqRow {
    /// Project an FAQ.
    #[must_use]
    pub fn project(faq: &Faq) -> Self {
        let target_user = if faq.target_user.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            faq.target_user
                .iter()
                .map(|target| target.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            id: faq.id.clone(),
            question: faq.question.clone(),
            target_user,
            faq_type: faq.faq_type.as_str(),
            status: faq.status.as_str(),
            created_at: faq
                .created_at
                .map_or_else(|| NOT_AVAILABLE.to_string(), |at| at.date_label()),
            actions: vec!["edit"],
        }
    }
}

// =============================================================================
// Customer care
// =============================================================================

/// Build the customer-care team table configuration.
#[must_use]
pub fn customer_care_table_config() -> DataTableConfig {
    DataTableConfig::new("customer_care")
        .column(TableColumn::sortable("name", "Name"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("available", "Available"))
        .column(TableColumn::new("assigned", "Assigned"))
        .column(TableColumn::sortable("points", "Points"))
        .empty_state("No representatives found.", None)
}

/// One customer-care table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCareRow {
    pub id: CustomerCareId,
    pub name: String,
    pub email: String,
    pub available: bool,
    pub assigned: bool,
    pub points: i64,
    pub banned: bool,
}

impl CustomerCareRow {
    /// Project a representative.
    #[must_use]
    pub fn project(rep: &CustomerCareRep) -> Self {
        Self {
            id: rep.id.clone(),
            name: rep.full_name(),
            email: rep.primary_email().unwrap_or(NOT_AVAILABLE).to_string(),
            available: rep.available_for_work,
            assigned: rep.is_assigned,
            points: rep.active_points,
            banned: rep.is_banned,
        }
    }
}

#[cfg(test)]
mod tests {
    use flashfood_admin_core::{
        EpochSeconds, FaqStatus, FaqType, ImageRef, INACTIVITY_THRESHOLD_SECS, LinkedUser,
        TargetUser,
    };

    use super::*;

    const NOW: i64 = 1_760_000_000;

    fn customer(is_banned: bool, last_login: i64) -> Customer {
        Customer {
            id: CustomerId::new("FF_CUS_1"),
            first_name: "An".to_string(),
            last_name: "Nguyen".to_string(),
            email: "profile@flashfood.app".to_string(),
            avatar: Some(ImageRef::new("https://cdn/a.png", "a")),
            user: Some(LinkedUser {
                email: "login@flashfood.app".to_string(),
            }),
            last_login,
            is_banned,
            ..Customer::default()
        }
    }

    #[test]
    fn test_default_columns_skip_hidden() {
        let config = faqs_table_config();
        assert!(!config.default_columns().contains(&"status".to_string()));
        assert_eq!(config.default_columns().len(), 5);
    }

    #[test]
    fn test_customer_row_uses_login_email_and_status() {
        let row = CustomerRow::project(&customer(false, NOW - 60), NOW);
        assert_eq!(row.email, "login@flashfood.app");
        assert_eq!(row.name, "An Nguyen");
        assert_eq!(row.avatar_url.as_deref(), Some("https://cdn/a.png"));
        assert_eq!(row.status_label, "Active");
        assert!(row.actions.contains(&"ban"));

        let inactive =
            CustomerRow::project(&customer(false, NOW - INACTIVITY_THRESHOLD_SECS - 1), NOW);
        assert_eq!(inactive.status, CustomerStatus::Inactive);

        let banned = CustomerRow::project(&customer(true, NOW), NOW);
        assert_eq!(banned.status_label, "Banned");
        assert!(!banned.actions.contains(&"ban"));
    }

    #[test]
    fn test_order_row_formats_money_and_hides_delete_when_delivered() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "FF_ORDER_1",
            "status": "DELIVERED",
            "total_amount": "12.5",
            "order_time": 1_700_000_000
        }))
        .expect("order");

        let row = OrderRow::project(&order);
        assert_eq!(row.total_amount, "$12.50");
        assert_eq!(row.order_time, "14/11/2023 22:13:20");
        assert_eq!(row.actions, vec!["view"]);
    }

    #[test]
    fn test_faq_row_joins_targets_or_falls_back() {
        let mut faq = Faq {
            id: FaqId::new("FF_FAQ_1"),
            question: "How do I pay?".to_string(),
            answer: vec![],
            faq_type: FaqType::Payment,
            status: FaqStatus::Active,
            target_user: vec![TargetUser::Customer, TargetUser::Driver],
            created_by_id: None,
            created_by: None,
            created_at: Some(EpochSeconds(1_700_000_000)),
            updated_at: None,
        };

        let row = FaqRow::project(&faq);
        assert_eq!(row.target_user, "CUSTOMER, DRIVER");
        assert_eq!(row.faq_type, "PAYMENT");
        assert_eq!(row.status, "ACTIVE");
        assert_eq!(row.created_at, "14/11/2023");

        faq.target_user.clear();
        faq.created_at = None;
        let row = FaqRow::project(&faq);
        assert_eq!(row.target_user, "N/A");
        assert_eq!(row.created_at, "N/A");
    }
}
