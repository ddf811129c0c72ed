//! Orders and the snapshots embedded in them.
//!
//! Nested customer, restaurant and driver records are snapshots taken at
//! order time, not live entities.

use serde::{Deserialize, Serialize};

use super::common::{ContactEmail, ContactPhone, EpochSeconds, ImageRef, full_name};
use super::id::{CustomerId, OrderId};
use super::money::Money;
use super::status::OrderStatus;

/// Menu item details attached to an order line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderedMenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub variant_id: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub price_at_time_of_order: Money,
    #[serde(default)]
    pub item: Option<OrderedMenuItem>,
}

impl OrderItem {
    /// Line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Money {
        Money::new(self.price_at_time_of_order.amount() * rust_decimal::Decimal::from(self.quantity))
    }
}

/// Customer snapshot on an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderCustomer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
}

/// Restaurant open/active flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestaurantStatus {
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_accepted_orders: bool,
}

/// Restaurant snapshot on an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderRestaurant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub address_id: Option<String>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    #[serde(default)]
    pub contact_email: Vec<ContactEmail>,
    #[serde(default)]
    pub contact_phone: Vec<ContactPhone>,
    #[serde(default)]
    pub status: Option<RestaurantStatus>,
}

/// Driver vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub license_plate: String,
}

impl Vehicle {
    /// `year brand model`, e.g. `2021 Honda Wave`.
    #[must_use]
    pub fn describe(&self) -> String {
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        format!("{year} {} {}", self.brand, self.model).trim().to_string()
    }
}

/// Driver snapshot on an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderDriver {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
}

impl OrderDriver {
    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// An order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub customer_id: CustomerId,
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: Money,
    #[serde(default)]
    pub delivery_fee: Money,
    #[serde(default)]
    pub service_fee: Money,
    #[serde(default)]
    pub driver_tips: Money,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub customer_location: Option<String>,
    #[serde(default)]
    pub restaurant_location: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(default)]
    pub restaurant_note: Option<String>,
    #[serde(default)]
    pub order_time: Option<EpochSeconds>,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub tracking_info: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub cancelled_by: Option<String>,
    #[serde(default)]
    pub cancelled_by_id: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancellation_title: Option<String>,
    #[serde(default)]
    pub cancellation_description: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<EpochSeconds>,
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    #[serde(default)]
    pub restaurant: Option<OrderRestaurant>,
    #[serde(default)]
    pub driver: Option<OrderDriver>,
}

impl Order {
    /// Whether the order was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled || self.cancelled_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_decodes_wire_shape() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "FF_ORDER_1",
                "customer_id": "FF_CUS_1",
                "restaurant_id": "FF_RES_1",
                "driver_id": null,
                "status": "PENDING",
                "total_amount": "25.5",
                "delivery_fee": "2",
                "service_fee": "0.5",
                "order_items": [
                    {"name": "Pho", "item_id": "I1", "variant_id": "V1", "quantity": 2, "price_at_time_of_order": 11.5}
                ],
                "order_time": "1760000000",
                "cancelled_by": null
            }"#,
        )
        .expect("deserialize");

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount.display(), "$25.50");
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.order_items[0].line_total().display(), "$23.00");
        assert_eq!(order.order_time.map(|t| t.as_secs()), Some(1_760_000_000));
        assert!(!order.is_cancelled());
    }

    #[test]
    fn test_vehicle_description() {
        let vehicle = Vehicle {
            year: Some(2021),
            brand: "Honda".to_string(),
            model: "Wave".to_string(),
            ..Vehicle::default()
        };
        assert_eq!(vehicle.describe(), "2021 Honda Wave");
    }
}
