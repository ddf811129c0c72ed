//! Decimal money amounts.
//!
//! The backend sends money as numeric strings (`"12.50"`) on orders and as
//! plain numbers on order items. [`Money`] accepts both and always
//! serializes back as a string.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A money amount in the platform currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimals (e.g., `$12.50`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        Decimal::from_str(trimmed).map(Self)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Text(String),
            Integer(i64),
            Float(f64),
            Null(()),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Wire::Integer(value) => Ok(Self(Decimal::from(value))),
            Wire::Float(value) => Decimal::from_f64(value)
                .map(Self)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {value}"))),
            Wire::Null(()) => Ok(Self::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_numeric_string() {
        let money: Money = serde_json::from_str("\"12.5\"").expect("deserialize");
        assert_eq!(money.display(), "$12.50");
    }

    #[test]
    fn test_money_from_number() {
        let money: Money = serde_json::from_str("7.25").expect("deserialize");
        assert_eq!(money.display(), "$7.25");
        let money: Money = serde_json::from_str("30000").expect("deserialize");
        assert_eq!(money.display(), "$30000.00");
    }

    #[test]
    fn test_money_null_and_blank_are_zero() {
        let money: Money = serde_json::from_str("null").expect("deserialize");
        assert_eq!(money, Money::ZERO);
        let money: Money = serde_json::from_str("\"\"").expect("deserialize");
        assert_eq!(money, Money::ZERO);
    }

    #[test]
    fn test_money_rejects_garbage() {
        assert!(serde_json::from_str::<Money>("\"twelve\"").is_err());
    }
}
