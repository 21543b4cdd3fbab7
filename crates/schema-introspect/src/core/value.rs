//! Raw metadata values as handed over by a metadata source.
//!
//! Drivers are loose about how they encode metadata: nullability may arrive
//! as `"YES"`, `1` or `true`, sizes as numbers or numeric strings. A
//! [`MetadataRow`] keeps the raw values and its accessors do the coercion,
//! so the reader never has to care which encoding a driver picked.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single raw metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// Boolean value.
    Bool(bool),

    /// Integer value.
    Int(i64),

    /// Floating point value (some drivers report sizes this way).
    Float(f64),

    /// Text value.
    Text(String),

    /// SQL NULL / absent.
    Null,
}

impl MetadataValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, MetadataValue::Null)
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(v) => write!(f, "{}", v),
            MetadataValue::Int(v) => write!(f, "{}", v),
            MetadataValue::Float(v) => write!(f, "{}", v),
            MetadataValue::Text(v) => f.write_str(v),
            MetadataValue::Null => f.write_str("NULL"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        MetadataValue::Text(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        MetadataValue::Text(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        MetadataValue::Int(v)
    }
}

impl From<i32> for MetadataValue {
    fn from(v: i32) -> Self {
        MetadataValue::Int(v as i64)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        MetadataValue::Bool(v)
    }
}

impl<T: Into<MetadataValue>> From<Option<T>> for MetadataValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(MetadataValue::Null)
    }
}

/// A field could not be read from a metadata row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("required field {0} is missing")]
    Missing(String),

    #[error("field {field} has unexpected value '{value}' (expected {expected})")]
    Invalid {
        field: String,
        value: String,
        expected: &'static str,
    },
}

/// One row of raw metadata, keyed by column label.
///
/// Labels are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRow(BTreeMap<String, MetadataValue>);

impl MetadataRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Look up a value, treating NULL the same as an absent field.
    pub fn get(&self, field: &str) -> Option<&MetadataValue> {
        self.0
            .get(field)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(field))
                    .map(|(_, v)| v)
            })
            .filter(|v| !v.is_null())
    }

    /// Read a field as text. Numbers and booleans are rendered as text.
    pub fn get_str(&self, field: &str) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    /// Read a field that must arrive as text.
    ///
    /// Unlike [`get_str`](Self::get_str), numbers and booleans are rejected:
    /// rendering them back would not reproduce what the driver reported
    /// (`1.50` reads back as `1.5`).
    pub fn get_text(&self, field: &str) -> Result<Option<String>, RowError> {
        match self.get(field) {
            None => Ok(None),
            Some(MetadataValue::Text(s)) => Ok(Some(s.clone())),
            Some(value) => Err(RowError::Invalid {
                field: field.to_string(),
                value: value.to_string(),
                expected: "text",
            }),
        }
    }

    /// Read a field as text, failing when it is absent or NULL.
    pub fn require_str(&self, field: &str) -> Result<String, RowError> {
        self.get_str(field)
            .ok_or_else(|| RowError::Missing(field.to_string()))
    }

    /// Read a field as an `i32`. Numeric strings are accepted; blank strings
    /// count as absent.
    pub fn get_i32(&self, field: &str) -> Result<Option<i32>, RowError> {
        let invalid = |value: &MetadataValue| RowError::Invalid {
            field: field.to_string(),
            value: value.to_string(),
            expected: "an integer",
        };

        match self.get(field) {
            None => Ok(None),
            Some(value @ MetadataValue::Int(v)) => {
                i32::try_from(*v).map(Some).map_err(|_| invalid(value))
            }
            Some(value @ MetadataValue::Float(v)) => {
                if v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64 {
                    Ok(Some(*v as i32))
                } else {
                    Err(invalid(value))
                }
            }
            Some(value @ MetadataValue::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse().map(Some).map_err(|_| invalid(value))
            }
            Some(value) => Err(invalid(value)),
        }
    }

    /// Read a field as an `i32`, failing when it is absent or NULL.
    pub fn require_i32(&self, field: &str) -> Result<i32, RowError> {
        self.get_i32(field)?
            .ok_or_else(|| RowError::Missing(field.to_string()))
    }

    /// Read a field as a boolean.
    ///
    /// Accepts `true`/`false`, `1`/`0` and the `YES`/`NO`/`Y`/`N` strings
    /// JDBC metadata uses. Blank strings count as absent (JDBC's "unknown").
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, RowError> {
        let invalid = |value: &MetadataValue| RowError::Invalid {
            field: field.to_string(),
            value: value.to_string(),
            expected: "a boolean",
        };

        match self.get(field) {
            None => Ok(None),
            Some(MetadataValue::Bool(v)) => Ok(Some(*v)),
            Some(MetadataValue::Int(0)) => Ok(Some(false)),
            Some(MetadataValue::Int(1)) => Ok(Some(true)),
            Some(value @ MetadataValue::Text(s)) => match s.trim().to_ascii_uppercase().as_str() {
                "" => Ok(None),
                "YES" | "Y" | "TRUE" | "1" => Ok(Some(true)),
                "NO" | "N" | "FALSE" | "0" => Ok(Some(false)),
                _ => Err(invalid(value)),
            },
            Some(value) => Err(invalid(value)),
        }
    }

    /// Iterate over the raw fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for MetadataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = MetadataRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_text_rejects_non_text() {
        let row = MetadataRow::new()
            .with("COLUMN_DEF", "1.50")
            .with("PRICE", MetadataValue::Float(1.5))
            .with("QTY", 1)
            .with("EMPTY", MetadataValue::Null);
        assert_eq!(row.get_text("COLUMN_DEF").unwrap().as_deref(), Some("1.50"));
        assert_eq!(row.get_text("EMPTY").unwrap(), None);
        assert_eq!(row.get_text("MISSING").unwrap(), None);
        assert!(matches!(
            row.get_text("PRICE"),
            Err(RowError::Invalid { expected: "text", .. })
        ));
        assert!(row.get_text("QTY").is_err());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let row = MetadataRow::new().with("column_name", "ID");
        assert_eq!(row.get_str("COLUMN_NAME").as_deref(), Some("ID"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let row = MetadataRow::new().with("COLUMN_DEF", MetadataValue::Null);
        assert!(row.get("COLUMN_DEF").is_none());
        assert_eq!(
            row.require_str("COLUMN_DEF"),
            Err(RowError::Missing("COLUMN_DEF".to_string()))
        );
    }

    #[test]
    fn test_get_i32_coercions() {
        let row = MetadataRow::new()
            .with("A", 12)
            .with("B", " 7 ")
            .with("C", "")
            .with("D", "seven")
            .with("E", MetadataValue::Float(10.0))
            .with("F", i64::MAX);

        assert_eq!(row.get_i32("A"), Ok(Some(12)));
        assert_eq!(row.get_i32("B"), Ok(Some(7)));
        assert_eq!(row.get_i32("C"), Ok(None));
        assert!(row.get_i32("D").is_err());
        assert_eq!(row.get_i32("E"), Ok(Some(10)));
        assert!(row.get_i32("F").is_err());
        assert_eq!(row.get_i32("MISSING"), Ok(None));
        assert!(row.require_i32("MISSING").is_err());
    }

    #[test]
    fn test_get_bool_coercions() {
        let row = MetadataRow::new()
            .with("A", "YES")
            .with("B", "no")
            .with("C", 1)
            .with("D", false)
            .with("E", "")
            .with("F", "maybe");

        assert_eq!(row.get_bool("A"), Ok(Some(true)));
        assert_eq!(row.get_bool("B"), Ok(Some(false)));
        assert_eq!(row.get_bool("C"), Ok(Some(true)));
        assert_eq!(row.get_bool("D"), Ok(Some(false)));
        assert_eq!(row.get_bool("E"), Ok(None));
        assert!(row.get_bool("F").is_err());
    }

    #[test]
    fn test_numbers_render_as_text() {
        let row = MetadataRow::new().with("COLUMN_DEF", 0);
        assert_eq!(row.get_str("COLUMN_DEF").as_deref(), Some("0"));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let row: MetadataRow = serde_yaml::from_str(
            "COLUMN_NAME: ID\nDATA_TYPE: 4\nCOLUMN_DEF: ~\nIS_NULLABLE: 'NO'\n",
        )
        .unwrap();
        assert_eq!(row.require_str("COLUMN_NAME"), Ok("ID".to_string()));
        assert_eq!(row.require_i32("DATA_TYPE"), Ok(4));
        assert!(row.get("COLUMN_DEF").is_none());
        assert_eq!(row.get_bool("IS_NULLABLE"), Ok(Some(false)));
    }
}
