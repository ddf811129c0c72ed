//! Small value types shared by several entities.

use serde::{Deserialize, Serialize};

/// Reference to an uploaded image (`{url, key}`).
///
/// `key` is the storage provider's public id; the upload endpoint returns it
/// as `public_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
}

impl ImageRef {
    /// Create an image reference.
    #[must_use]
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }

    /// Whether the reference points at nothing yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

/// A contact email entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactEmail {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A contact phone entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactPhone {
    #[serde(default)]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Name-and-avatar snapshot of a person embedded in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<ImageRef>,
}

impl PersonSnapshot {
    /// `first last`, trimmed.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Join first and last names, tolerating blanks.
#[must_use]
pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

/// Epoch-seconds timestamp that the backend sends either as a number or as
/// a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EpochSeconds(pub i64);

impl EpochSeconds {
    /// The raw seconds value.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        self.0
    }

    /// Format as `dd/mm/yyyy` (UTC).
    #[must_use]
    pub fn date_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.0, 0)
            .map(|at| at.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }

    /// Format as `dd/mm/yyyy HH:MM:SS` (UTC).
    #[must_use]
    pub fn exact_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.0, 0)
            .map(|at| at.format("%d/%m/%Y %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for EpochSeconds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Integer(secs) => Ok(Self(secs)),
            #[allow(clippy::cast_possible_truncation)] // epoch seconds fit in i64
            Wire::Float(secs) => Ok(Self(secs.trunc() as i64)),
            Wire::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(|secs| {
                    #[allow(clippy::cast_possible_truncation)] // epoch seconds fit in i64
                    let whole = secs.trunc() as i64;
                    Self(whole)
                })
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_accepts_number_and_string() {
        let from_number: EpochSeconds = serde_json::from_str("1700000000").expect("number");
        let from_string: EpochSeconds = serde_json::from_str("\"1700000000.25\"").expect("string");
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.date_label(), "14/11/2023");
    }

    #[test]
    fn test_full_name_tolerates_blanks() {
        assert_eq!(full_name("An", ""), "An");
        assert_eq!(full_name(" An ", " Nguyen"), "An Nguyen");
        assert_eq!(full_name("", ""), "");
    }
}
