//! Customer-care representatives.

use serde::{Deserialize, Serialize};

use super::common::{ImageRef, full_name};
use super::id::CustomerCareId;

/// Contact email entry on a representative.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepEmail {
    #[serde(default)]
    pub email: String,
}

/// A customer-care representative.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerCareRep {
    pub id: CustomerCareId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub active_points: i64,
    #[serde(default)]
    pub avatar: Option<ImageRef>,
    #[serde(default)]
    pub is_assigned: bool,
    #[serde(default)]
    pub available_for_work: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_email: Vec<RepEmail>,
    #[serde(default)]
    pub is_banned: bool,
}

impl CustomerCareRep {
    /// Display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// First contact email, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.contact_email
            .iter()
            .map(|entry| entry.email.as_str())
            .find(|email| !email.is_empty())
    }
}
