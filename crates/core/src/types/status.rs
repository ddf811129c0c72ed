//! Status enums for various entities.
//!
//! Backend enums that the dashboard only displays are open-ended: unknown
//! values are preserved verbatim in an `Other` variant so a new server-side
//! state never breaks list decoding. Enums the dashboard sends back (FAQ
//! type/status, roles) are closed.

use serde::{Deserialize, Serialize};

/// Defines an open string enum with known variants and an `Other` fallback.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this client does not know about.
            Other(String),
        }

        impl $name {
            /// Wire representation of the value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// Order lifecycle status.
    OrderStatus {
        Pending => "PENDING",
        RestaurantAccepted => "RESTAURANT_ACCEPTED",
        Preparing => "PREPARING",
        InProgress => "IN_PROGRESS",
        ReadyForPickup => "READY_FOR_PICKUP",
        Dispatched => "DISPATCHED",
        EnRoute => "EN_ROUTE",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
        Returned => "RETURNED",
        DeliveryFailed => "DELIVERY_FAILED",
    }
}

open_enum! {
    /// Customer complaint (support ticket) status.
    ComplaintStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Pending => "PENDING",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
    }
}

open_enum! {
    /// Complaint priority.
    ComplaintPriority {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

open_enum! {
    /// Audience an FAQ entry is shown to.
    TargetUser {
        Customer => "CUSTOMER",
        Driver => "DRIVER",
        RestaurantOwner => "RESTAURANT_OWNER",
        CustomerCare => "CUSTOMER_CARE_REPRESENTATIVE",
    }
}

/// FAQ category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaqType {
    Service,
    Account,
    #[default]
    General,
    Payment,
}

impl FaqType {
    /// Wire representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::Account => "ACCOUNT",
            Self::General => "GENERAL",
            Self::Payment => "PAYMENT",
        }
    }
}

impl std::fmt::Display for FaqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FAQ publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaqStatus {
    #[default]
    Active,
    Draft,
    Archived,
}

impl FaqStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Draft => "DRAFT",
            Self::Archived => "ARCHIVED",
        }
    }
}

/// Role tag of the logged-in dashboard operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    /// Full access, including admin management.
    SuperAdmin,
    /// Operations admin; FAQ management only under App Managers.
    CompanionAdmin,
    /// Finance admin; fees and balance activity.
    FinanceAdmin,
    /// Customer-care agent; orders and settings.
    CustomerCareRepresentative,
}

impl AdminRole {
    /// All roles, in menu-table order.
    pub const ALL: [Self; 4] = [
        Self::SuperAdmin,
        Self::CompanionAdmin,
        Self::FinanceAdmin,
        Self::CustomerCareRepresentative,
    ];

    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::CompanionAdmin => "COMPANION_ADMIN",
            Self::FinanceAdmin => "FINANCE_ADMIN",
            Self::CustomerCareRepresentative => "CUSTOMER_CARE_REPRESENTATIVE",
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid admin role: {s}"))
    }
}
