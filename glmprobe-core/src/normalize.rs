//! Tolerant normalization of upstream usage payloads.
//!
//! The usage endpoint's response shape has changed between plans and API
//! versions, so this module assumes as little as possible: it matches on
//! the top-level JSON shape, converts what it recognizes, and wraps anything
//! else in a single raw-data fallback card. It never fails.

use serde_json::Value;

use crate::models::{CardValue, QuotaCard};

/// Title of the fallback card emitted for unrecognized payloads.
pub const RAW_RESPONSE_TITLE: &str = "Raw API Response";

/// Unit label applied to cards synthesized from bare scalars.
const DEFAULT_UNIT: &str = "units";

/// Converts an arbitrary upstream JSON body into quota cards.
///
/// Shape handling, first match wins:
///
/// 1. Array: each element is assumed to already be card-shaped and is
///    passed through; elements that do not deserialize as cards are skipped.
/// 2. Object: each key with a scalar value becomes one card (`title` from
///    the snake_case key, `limit` 0). Nested values are skipped, not
///    flattened; this code does not pretend to understand structure it
///    has never seen.
/// 3. Anything that produced zero cards yields exactly one fallback card
///    carrying the re-serialized payload in `raw_data`.
pub fn normalize(raw: &Value) -> Vec<QuotaCard> {
    let cards = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                CardValue::from_scalar(value).map(|used| QuotaCard {
                    title: title_case(key),
                    used,
                    limit: 0,
                    unit_text: Some(DEFAULT_UNIT.to_string()),
                    tooltip: None,
                    raw_data: None,
                })
            })
            .collect(),
        _ => Vec::new(),
    };

    if cards.is_empty() {
        vec![fallback_card(raw)]
    } else {
        cards
    }
}

/// Builds the step-3 fallback card with the payload preserved for diagnosis.
fn fallback_card(raw: &Value) -> QuotaCard {
    QuotaCard {
        title: RAW_RESPONSE_TITLE.to_string(),
        used: CardValue::Int(0),
        limit: 0,
        unit_text: None,
        tooltip: None,
        raw_data: Some(raw.to_string()),
    }
}

/// Converts a `snake_case` key into a Title Case heading.
fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================
