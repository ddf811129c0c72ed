//! Customer complaint (support ticket) history.

use serde::{Deserialize, Serialize};

use super::common::PersonSnapshot;
use super::id::{ComplaintId, CustomerId, OrderId};
use super::money::Money;
use super::order::OrderItem;
use super::status::{ComplaintPriority, ComplaintStatus, OrderStatus};

/// Order linked to a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintOrder {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: Money,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// One complaint raised by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintHistory {
    pub id: ComplaintId,
    #[serde(default)]
    pub customer_id: CustomerId,
    #[serde(default)]
    pub assignee_type: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub issue_type: Option<String>,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    #[serde(default)]
    pub resolution_type: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub resolved_at: Option<i64>,
    #[serde(default)]
    pub first_response_at: Option<i64>,
    #[serde(default)]
    pub last_response_at: Option<i64>,
    #[serde(default)]
    pub customer: Option<PersonSnapshot>,
    #[serde(default)]
    pub assigned_customer_care: Option<PersonSnapshot>,
    #[serde(default)]
    pub order: Option<ComplaintOrder>,
}

impl ComplaintHistory {
    /// Whether the complaint has been resolved or closed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            ComplaintStatus::Resolved | ComplaintStatus::Closed
        ) || self.resolved_at.is_some()
    }
}
