//! Dashboard output types.
//!
//! A [`QuotaCard`] is the single unit the dashboard renders: a title, a
//! used value (number or text), an optional limit, and optional decoration.
//! The field names here are a stable contract with downstream tooling and
//! must not change.

use serde::{Deserialize, Serialize};

// ============================================================================
// Card Value
// ============================================================================

/// The `used` slot of a quota card: either a numeric reading or a status
/// string like `"Operational"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardValue {
    /// Integer reading (token counts, latency in ms).
    Int(i64),
    /// Fractional reading (credits, dollar amounts).
    Float(f64),
    /// Status text.
    Text(String),
}

impl From<i64> for CardValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for CardValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for CardValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for CardValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl CardValue {
    /// Converts a scalar JSON value, if it is one.
    ///
    /// Returns `None` for objects, arrays, booleans, and null; the
    /// normalizer skips those rather than guessing at their meaning.
    pub fn from_scalar(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// Quota Card
// ============================================================================

/// One normalized unit of dashboard-displayable status information.
///
/// `title` and `used` are always present; `limit` defaults to 0 when the
/// provider has no limit concept. Optional fields are omitted from the
/// serialized output entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaCard {
    /// Card heading.
    pub title: String,
    /// Current reading.
    pub used: CardValue,
    /// Reference ceiling; 0 means "no limit known".
    #[serde(default)]
    pub limit: u64,
    /// Unit label rendered next to the reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_text: Option<String>,
    /// Hover text with extra context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Raw upstream payload, only set on the fallback card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<String>,
}

impl QuotaCard {
    /// Creates a card with just a title and a used value.
    pub fn new(title: impl Into<String>, used: impl Into<CardValue>) -> Self {
        Self {
            title: title.into(),
            used: used.into(),
            limit: 0,
            unit_text: None,
            tooltip: None,
            raw_data: None,
        }
    }

    /// Sets the limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_text = Some(unit.into());
        self
    }

    /// Sets the tooltip.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_value_serializes_untagged() {
        assert_eq!(serde_json::to_value(CardValue::Int(42)).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(CardValue::Text("Error".into())).unwrap(),
            json!("Error")
        );
    }

    #[test]
    fn test_from_scalar() {
        assert_eq!(CardValue::from_scalar(&json!(42)), Some(CardValue::Int(42)));
        assert_eq!(
            CardValue::from_scalar(&json!(1.5)),
            Some(CardValue::Float(1.5))
        );
        assert_eq!(
            CardValue::from_scalar(&json!("pro")),
            Some(CardValue::Text("pro".into()))
        );
        assert_eq!(CardValue::from_scalar(&json!({"a": 1})), None);
        assert_eq!(CardValue::from_scalar(&json!([1])), None);
        assert_eq!(CardValue::from_scalar(&json!(true)), None);
        assert_eq!(CardValue::from_scalar(&json!(null)), None);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let card = QuotaCard::new("Latency", 42).with_limit(1000).with_unit("ms");
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({"title": "Latency", "used": 42, "limit": 1000, "unit_text": "ms"})
        );
    }

    #[test]
    fn test_card_roundtrip() {
        let json = json!({"title": "X", "used": 1, "limit": 5, "unit_text": "u"});
        let card: QuotaCard = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&card).unwrap(), json);
    }

    #[test]
    fn test_limit_defaults_to_zero() {
        let card: QuotaCard =
            serde_json::from_value(json!({"title": "X", "used": "ok"})).unwrap();
        assert_eq!(card.limit, 0);
    }
}
