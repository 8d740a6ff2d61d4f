//! Request payload validation.
//!
//! Every validator takes the raw, loosely typed payload a client sent and returns
//! either a typed value ready for persistence or a [`FieldErrors`] map keyed by
//! the offending field. Nothing downstream sees a payload that failed here.

pub mod meal;
pub mod menu;
pub mod order;
pub mod user;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Field name -> human readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Keeps the first message recorded for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A number sent either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()
            }
        };
        value.filter(|n| n.is_finite())
    }

    /// Whole, strictly positive values that fit in an `i32`.
    pub fn as_positive_i32(&self) -> Option<i32> {
        let value = match self {
            Numeric::Text(s) => s.trim().parse::<i32>().ok(),
            Numeric::Number(n) if n.fract() == 0.0 && *n <= i32::MAX as f64 => Some(*n as i32),
            Numeric::Number(_) => None,
        };
        value.filter(|n| *n > 0)
    }
}

/// Trimmed text, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Path ids must be non-empty strings of ASCII digits.
pub fn parse_id(raw: &str, message: &str) -> Result<i32, FieldErrors> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldErrors::single("id", message));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| FieldErrors::single("id", message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_digits_only() {
        assert_eq!(parse_id("42", "bad"), Ok(42));
        assert_eq!(parse_id(" 7 ", "bad"), Ok(7));
        for raw in ["", "  ", "abc", "-1", "1.5", "12a", "99999999999"] {
            let err = parse_id(raw, "Meal id must be a number").unwrap_err();
            assert_eq!(err.get("id"), Some("Meal id must be a number"), "raw = {raw:?}");
        }
    }

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        assert_eq!(Numeric::Number(2.5).as_f64(), Some(2.5));
        assert_eq!(Numeric::Text(" 1200 ".into()).as_f64(), Some(1200.0));
        assert_eq!(Numeric::Text("12abc".into()).as_f64(), None);
        assert_eq!(Numeric::Text("".into()).as_f64(), None);
        assert_eq!(Numeric::Text("NaN".into()).as_f64(), None);
    }

    #[test]
    fn positive_i32_rejects_fractions_and_non_positive() {
        assert_eq!(Numeric::Number(3.0).as_positive_i32(), Some(3));
        assert_eq!(Numeric::Text("4".into()).as_positive_i32(), Some(4));
        assert_eq!(Numeric::Number(1.5).as_positive_i32(), None);
        assert_eq!(Numeric::Number(0.0).as_positive_i32(), None);
        assert_eq!(Numeric::Text("-2".into()).as_positive_i32(), None);
    }

    #[test]
    fn field_errors_keep_first_message_and_serialize_flat() {
        let mut errors = FieldErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        errors.add("price", "bad price");
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"name": "first", "price": "bad price"})
        );
    }
}
