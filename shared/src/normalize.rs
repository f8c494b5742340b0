//! Field-name normalization for loosely keyed API rows.
//!
//! The analytics API serves the same column under a snake_case key on some
//! queries and a spaced, human-readable key on others (`number_of_gamers`
//! vs `"number of gamers"`). Each row type lists its fallback chain once in
//! its [`FromRow`] impl. Fixed-shape bodies (envelope metadata, cache and
//! health status) derive `Deserialize` with the [`lenient`] adapters.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};
use crate::format::{safe_int_prefix, safe_number};
use crate::models::envelope::ApiMetadata;

pub type Row = Map<String, Value>;

/// JavaScript truthiness, which decides whether a fallback chain moves on.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read-only view over one row with fallback-chain accessors.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    row: &'a Row,
}

impl<'a> FieldReader<'a> {
    pub fn new(row: &'a Row) -> Self {
        Self { row }
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    /// First truthy value along `keys`.
    ///
    /// When every key is falsy the last present value is returned, so a
    /// literal `0` still reads as zero rather than as missing.
    pub fn value(&self, keys: &[&str]) -> Option<&'a Value> {
        let mut last_present = None;
        for key in keys {
            if let Some(v) = self.row.get(*key) {
                if is_truthy(v) {
                    return Some(v);
                }
                last_present = Some(v);
            }
        }
        last_present
    }

    pub fn text(&self, keys: &[&str], default: &str) -> String {
        match self.value(keys) {
            Some(v) if is_truthy(v) => match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            _ => default.to_string(),
        }
    }

    pub fn opt_text(&self, keys: &[&str]) -> Option<String> {
        self.value(keys).and_then(text_value)
    }

    pub fn number(&self, keys: &[&str]) -> f64 {
        self.value(keys).map(|v| safe_number(v, 0.0)).unwrap_or(0.0)
    }

    pub fn opt_number(&self, keys: &[&str]) -> Option<f64> {
        self.value(keys)
            .filter(|v| !v.is_null())
            .map(|v| safe_number(v, 0.0))
    }

    pub fn int_prefix(&self, keys: &[&str]) -> i64 {
        self.value(keys).map(safe_int_prefix).unwrap_or(0)
    }

    pub fn flag(&self, keys: &[&str]) -> bool {
        self.value(keys).map_or(false, flag_value)
    }

    /// Array of strings; a comma-separated string is split and trimmed.
    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        self.value(keys).map(list_value).unwrap_or_default()
    }

    pub fn object(&self, keys: &[&str]) -> Option<&'a Row> {
        self.value(keys).and_then(Value::as_object)
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(_) => Some(value.to_string()),
        _ => None,
    }
}

fn flag_value(value: &Value) -> bool {
    match value {
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        other => is_truthy(other),
    }
}

fn list_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_list(s),
        _ => Vec::new(),
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A record decoded from one API row. Never fails; missing fields default.
pub trait FromRow: Sized {
    fn from_row(row: &FieldReader<'_>) -> Self;
}

/// A whole endpoint response.
pub trait FromResponse: Sized {
    fn from_response(value: &Value) -> Result<Self>;

    /// Server-side refresh time carried by the response, if any.
    fn last_updated(&self) -> Option<&str> {
        None
    }
}

/// Decodes an array of rows, skipping entries that are not objects.
pub fn rows_from<R: FromRow>(items: &[Value]) -> Vec<R> {
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(row) => rows.push(R::from_row(&FieldReader::new(row))),
            None => warn!("Skipping non-object row at index {}", index),
        }
    }
    rows
}

/// Rows plus the cache metadata of a standard analytics response.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<R> {
    pub metadata: Option<ApiMetadata>,
    pub rows: Vec<R>,
}

impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self { metadata: None, rows: Vec::new() }
    }
}

impl<R> Dataset<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<R: FromRow> FromResponse for Dataset<R> {
    fn from_response(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self { metadata: None, rows: rows_from(items) }),
            Value::Object(obj) => {
                let metadata = match obj.get("metadata") {
                    Some(meta @ Value::Object(_)) => match ApiMetadata::deserialize(meta) {
                        Ok(meta) => Some(meta),
                        Err(e) => {
                            warn!("Ignoring malformed response metadata: {}", e);
                            None
                        }
                    },
                    _ => None,
                };
                let rows = match obj.get("data") {
                    Some(Value::Array(items)) => rows_from(items),
                    Some(Value::Null) | None => {
                        debug!("Response has no data array, treating as empty");
                        Vec::new()
                    }
                    Some(_) => {
                        return Err(ApiError::Decode("`data` is not an array".to_string()));
                    }
                };
                Ok(Self { metadata, rows })
            }
            _ => Err(ApiError::Decode(format!(
                "expected an object or array, got {}",
                json_kind(value)
            ))),
        }
    }

    fn last_updated(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.last_updated.as_deref())
    }
}

/// `deserialize_with` adapters for serde-decoded types, applying the same
/// coercions as [`FieldReader`]. Missing fields need `#[serde(default)]`.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{flag_value, list_value, text_value};
    use crate::format::safe_number;

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(safe_number(&Value::deserialize(d)?, 0.0))
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok((!value.is_null()).then(|| safe_number(&value, 0.0)))
    }

    pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(opt_number(d)?.map(|v| v as i64))
    }

    pub fn opt_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(opt_number(d)?.map(|v| v.max(0.0) as u64))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(flag_value(&Value::deserialize(d)?))
    }

    pub fn opt_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let value = Value::deserialize(d)?;
        Ok((!value.is_null()).then(|| flag_value(&value)))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(text_value(&Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text_value(&Value::deserialize(d)?))
    }

    pub fn list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(list_value(&Value::deserialize(d)?))
    }
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[derive(Debug, PartialEq)]
    struct Sample {
        gamers: f64,
        project: String,
    }

    impl FromRow for Sample {
        fn from_row(r: &FieldReader<'_>) -> Self {
            Self {
                gamers: r.number(&["number_of_gamers", "number of gamers"]),
                project: r.text(&["project", "game project", "game"], "Unknown"),
            }
        }
    }

    #[test]
    fn test_fallback_chain_prefers_first_truthy() {
        let r = row(json!({"number_of_gamers": 0, "number of gamers": "12", "game": "Star Atlas"}));
        let sample = Sample::from_row(&FieldReader::new(&r));
        assert_eq!(sample, Sample { gamers: 12.0, project: "Star Atlas".into() });
    }

    #[test]
    fn test_zero_survives_when_nothing_else_present() {
        let r = row(json!({"number_of_gamers": 0}));
        assert_eq!(FieldReader::new(&r).value(&["number_of_gamers", "x"]), Some(&json!(0)));
        assert_eq!(FieldReader::new(&r).number(&["number_of_gamers"]), 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let r = row(json!({}));
        let sample = Sample::from_row(&FieldReader::new(&r));
        assert_eq!(sample, Sample { gamers: 0.0, project: "Unknown".into() });
    }

    #[test]
    fn test_list_splits_comma_strings() {
        let r = row(json!({"games": "Aurory,  Star Atlas ,", "tags": ["a", null, 3]}));
        let reader = FieldReader::new(&r);
        assert_eq!(reader.list(&["games"]), vec!["Aurory", "Star Atlas"]);
        assert_eq!(reader.list(&["tags"]), vec!["a", "3"]);
    }

    #[test]
    fn test_dataset_accepts_envelope_and_bare_array() {
        let envelope = json!({
            "metadata": {"source": "dune", "last_updated": "2024-01-01 00:00:00 UTC", "row_count": 2},
            "data": [{"project": "A", "number_of_gamers": 1}, "junk", {"game": "B"}]
        });
        let ds: Dataset<Sample> = Dataset::from_response(&envelope).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.last_updated(), Some("2024-01-01 00:00:00 UTC"));
        assert_eq!(ds.rows[1].project, "B");

        let bare: Dataset<Sample> = Dataset::from_response(&json!([{"project": "C"}])).unwrap();
        assert!(bare.metadata.is_none());
        assert_eq!(bare.rows[0].project, "C");
    }

    #[test]
    fn test_dataset_rejects_scalars() {
        let err = Dataset::<Sample>::from_response(&json!("oops")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
    }
}
