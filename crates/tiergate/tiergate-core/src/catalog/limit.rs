//! Usage ceilings and the `UNLIMITED` sentinel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tier's ceiling for one countable resource.
///
/// `Unlimited` is its own variant rather than a magic number, so it can never
/// compare equal to any finite ceiling.
///
/// On the wire a ceiling is either a non-negative integer or the string
/// `"unlimited"`. `-1` is also read as unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LimitEntry", into = "LimitEntry")]
pub enum LimitValue {
    Finite(u64),
    Unlimited,
}

impl LimitValue {
    pub const UNLIMITED: LimitValue = LimitValue::Unlimited;

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// The finite ceiling, if there is one.
    pub fn finite(&self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(*n),
            Self::Unlimited => None,
        }
    }

    /// Whether `self` grants strictly more headroom than `other`.
    pub fn exceeds(&self, other: &LimitValue) -> bool {
        match (self, other) {
            (Self::Unlimited, Self::Unlimited) => false,
            (Self::Unlimited, Self::Finite(_)) => true,
            (Self::Finite(_), Self::Unlimited) => false,
            (Self::Finite(a), Self::Finite(b)) => a > b,
        }
    }
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

impl From<u64> for LimitValue {
    fn from(n: u64) -> Self {
        Self::Finite(n)
    }
}

/// A ceiling exactly as written in a config document, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitEntry {
    Number(i64),
    Text(String),
}

impl LimitEntry {
    /// Resolve to a `LimitValue`, or hand back the offending text.
    pub fn resolve(&self) -> Result<LimitValue, String> {
        match self {
            Self::Number(-1) => Ok(LimitValue::Unlimited),
            Self::Number(n) => u64::try_from(*n)
                .map(LimitValue::Finite)
                .map_err(|_| n.to_string()),
            Self::Text(s) if s.eq_ignore_ascii_case("unlimited") => Ok(LimitValue::Unlimited),
            Self::Text(s) => Err(s.clone()),
        }
    }
}

impl TryFrom<LimitEntry> for LimitValue {
    type Error = String;

    fn try_from(raw: LimitEntry) -> Result<Self, Self::Error> {
        raw.resolve()
            .map_err(|value| format!("Invalid limit value: {value}"))
    }
}

impl From<LimitValue> for LimitEntry {
    fn from(limit: LimitValue) -> Self {
        match limit {
            // Ceilings past i64::MAX are not representable in TOML anyway.
            LimitValue::Finite(n) => LimitEntry::Number(i64::try_from(n).unwrap_or(i64::MAX)),
            LimitValue::Unlimited => LimitEntry::Text("unlimited".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_equals_finite() {
        assert_ne!(LimitValue::UNLIMITED, LimitValue::Finite(u64::MAX));
        assert_ne!(LimitValue::UNLIMITED, LimitValue::Finite(0));
    }

    #[test]
    fn parses_sentinels() {
        let parsed: Vec<LimitValue> =
            serde_json::from_str(r#"[10, "unlimited", "UNLIMITED", -1, 0]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                LimitValue::Finite(10),
                LimitValue::Unlimited,
                LimitValue::Unlimited,
                LimitValue::Unlimited,
                LimitValue::Finite(0),
            ]
        );
    }

    #[test]
    fn rejects_other_negatives_and_text() {
        assert!(serde_json::from_str::<LimitValue>("-5").is_err());
        assert!(serde_json::from_str::<LimitValue>(r#""lots""#).is_err());
    }

    #[test]
    fn entry_resolution_reports_offending_value() {
        assert_eq!(LimitEntry::Number(-4).resolve(), Err("-4".to_string()));
        assert_eq!(LimitEntry::Text("lots".into()).resolve(), Err("lots".to_string()));
        assert_eq!(LimitEntry::Number(-1).resolve(), Ok(LimitValue::Unlimited));
        assert_eq!(LimitEntry::Number(3).resolve(), Ok(LimitValue::Finite(3)));
    }

    #[test]
    fn serializes_unlimited_as_text() {
        assert_eq!(
            serde_json::to_string(&LimitValue::Unlimited).unwrap(),
            r#""unlimited""#
        );
        assert_eq!(serde_json::to_string(&LimitValue::Finite(7)).unwrap(), "7");
    }

    #[test]
    fn exceeds_orders_headroom() {
        assert!(LimitValue::Unlimited.exceeds(&LimitValue::Finite(500)));
        assert!(LimitValue::Finite(500).exceeds(&LimitValue::Finite(10)));
        assert!(!LimitValue::Finite(10).exceeds(&LimitValue::Finite(10)));
        assert!(!LimitValue::Unlimited.exceeds(&LimitValue::Unlimited));
        assert!(!LimitValue::Finite(10).exceeds(&LimitValue::Unlimited));
    }
}
