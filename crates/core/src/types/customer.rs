//! Customer records and the derived activity status.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::common::{ImageRef, full_name};
use super::id::CustomerId;

/// Seconds without a login after which a customer counts as inactive (30 days).
pub const INACTIVITY_THRESHOLD_SECS: i64 = 2_592_000;

/// A customer address line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
}

/// Login account linked to a customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkedUser {
    #[serde(default)]
    pub email: String,
}

/// A customer as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: Vec<Address>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    #[serde(default)]
    pub user: Option<LinkedUser>,
    /// Last login, epoch seconds.
    #[serde(default)]
    pub last_login: i64,
    #[serde(default)]
    pub is_banned: bool,
}

impl Customer {
    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// Login email, falling back to the profile email.
    #[must_use]
    pub fn login_email(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.email.as_str())
            .filter(|email| !email.is_empty())
            .unwrap_or(&self.email)
    }

    /// Derived status at `now` (epoch seconds).
    #[must_use]
    pub const fn status_at(&self, now: i64) -> CustomerStatus {
        CustomerStatus::classify(self.is_banned, self.last_login, now)
    }
}

/// Status shown for a customer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Banned,
}

impl CustomerStatus {
    /// Classify a customer.
    ///
    /// Banned wins regardless of login time; otherwise a customer is
    /// inactive when more than [`INACTIVITY_THRESHOLD_SECS`] have passed
    /// since `last_login`.
    #[must_use]
    pub const fn classify(is_banned: bool, last_login: i64, now: i64) -> Self {
        if is_banned {
            Self::Banned
        } else if now.saturating_sub(last_login) > INACTIVITY_THRESHOLD_SECS {
            Self::Inactive
        } else {
            Self::Active
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Banned => "Banned",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hit from the user search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub id: CustomerId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    /// ISO-8601 timestamp.
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Search hits as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSearchResults {
    #[serde(default)]
    pub results: Vec<UserSearchResult>,
}

impl From<UserSearchResult> for Customer {
    fn from(hit: UserSearchResult) -> Self {
        let last_login = hit
            .last_login
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map_or(0, |at| at.timestamp());

        Self {
            id: hit.id,
            first_name: hit.first_name.unwrap_or_default(),
            last_name: hit.last_name.unwrap_or_default(),
            email: hit.email.unwrap_or_default(),
            phone_number: String::new(),
            address: Vec::new(),
            avatar: Some(hit.avatar.unwrap_or_default()),
            user: Some(LinkedUser {
                email: hit.user_email.unwrap_or_default(),
            }),
            last_login,
            is_banned: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_760_000_000;

    #[test]
    fn test_banned_wins_regardless_of_last_login() {
        for last_login in [0, NOW - INACTIVITY_THRESHOLD_SECS - 1, NOW, NOW + 60] {
            assert_eq!(
                CustomerStatus::classify(true, last_login, NOW),
                CustomerStatus::Banned
            );
        }
    }

    #[test]
    fn test_inactive_only_strictly_past_threshold() {
        assert_eq!(
            CustomerStatus::classify(false, NOW - INACTIVITY_THRESHOLD_SECS, NOW),
            CustomerStatus::Active
        );
        assert_eq!(
            CustomerStatus::classify(false, NOW - INACTIVITY_THRESHOLD_SECS - 1, NOW),
            CustomerStatus::Inactive
        );
        assert_eq!(
            CustomerStatus::classify(false, NOW - 60, NOW),
            CustomerStatus::Active
        );
    }

    #[test]
    fn test_never_logged_in_is_inactive() {
        assert_eq!(CustomerStatus::classify(false, 0, NOW), CustomerStatus::Inactive);
    }

    #[test]
    fn test_customer_tolerates_missing_fields() {
        let customer: Customer =
            serde_json::from_str(r#"{"id":"FF_CUS_1","first_name":"Lan"}"#).expect("deserialize");
        assert_eq!(customer.full_name(), "Lan");
        assert_eq!(customer.last_login, 0);
        assert!(!customer.is_banned);
        assert_eq!(customer.login_email(), "");
    }

    #[test]
    fn test_login_email_prefers_linked_user() {
        let customer = Customer {
            email: "profile@example.com".to_string(),
            user: Some(LinkedUser {
                email: "login@example.com".to_string(),
            }),
            ..Customer::default()
        };
        assert_eq!(customer.login_email(), "login@example.com");
    }

    #[test]
    fn test_search_hit_converts_to_customer() {
        let hit = UserSearchResult {
            id: CustomerId::new("FF_CUS_9"),
            first_name: Some("Minh".to_string()),
            last_name: None,
            email: None,
            user_email: Some("minh@example.com".to_string()),
            avatar: None,
            last_login: Some("2025-10-09T08:53:20Z".to_string()),
        };

        let customer = Customer::from(hit);
        assert_eq!(customer.full_name(), "Minh");
        assert_eq!(customer.login_email(), "minh@example.com");
        assert_eq!(customer.last_login, 1_760_000_000);
        assert!(!customer.is_banned);
    }

    #[test]
    fn test_search_hit_with_bad_timestamp_has_zero_login() {
        let hit = UserSearchResult {
            id: CustomerId::new("FF_CUS_9"),
            last_login: Some("yesterday".to_string()),
            ..UserSearchResult::default()
        };
        assert_eq!(Customer::from(hit).last_login, 0);
    }
}
