use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

/// Text that stands in for a binary payload wherever a record is shown or
/// exported.
pub const BINARY_PLACEHOLDER: &str = "<binary data>";

// ---------------------------------------------------------------------------
// DecodingRule – how a column's stored values are interpreted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodingRule {
    /// Image-like payload. Never decoded into text.
    OpaqueBinary,
    /// Variable-length list of `f64` (e.g. a bounding box).
    NumericSequence,
    /// Anything else, decoded as a UTF-8 string.
    Text,
}

impl fmt::Display for DecodingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingRule::OpaqueBinary => write!(f, "opaque binary"),
            DecodingRule::NumericSequence => write!(f, "numeric sequence"),
            DecodingRule::Text => write!(f, "text"),
        }
    }
}

/// A column name paired with the rule used to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    pub name: String,
    pub rule: DecodingRule,
}

// ---------------------------------------------------------------------------
// FieldValue – a single decoded cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Numbers(Vec<f64>),
    /// An opaque payload. The bytes are dropped during decoding.
    Binary,
    /// A null text or sequence cell.
    Null,
}

impl FieldValue {
    /// Falsy values count as missing: empty text, empty sequence, null.
    /// Text is compared as stored, so `"0"` is present. Binary payloads are
    /// never inspected.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Numbers(v) => v.is_empty(),
            FieldValue::Binary => false,
            FieldValue::Null => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form used for export. Binary payloads become the placeholder.
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::Numbers(v) => {
                JsonValue::Array(v.iter().map(|&x| JsonValue::from(x)).collect())
            }
            FieldValue::Binary => JsonValue::String(BINARY_PLACEHOLDER.to_string()),
            FieldValue::Null => JsonValue::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Numbers(v) => write!(f, "{v:?}"),
            FieldValue::Binary => write!(f, "{BINARY_PLACEHOLDER}"),
            FieldValue::Null => write!(f, "None"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one decoded row
// ---------------------------------------------------------------------------

/// Export form of a record: column order is preserved.
pub type MaskedRecord = Map<String, JsonValue>;

/// One row of a data file. Column names are shared by every record of the
/// same dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<FieldValue>,
}

impl Record {
    /// `values` must line up with `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Record { columns, values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| &self.values[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Fields in natural (file) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binary payloads replaced by the placeholder, everything else kept.
    pub fn masked(&self) -> MaskedRecord {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – one loaded data file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    /// File stem, e.g. `android_control` for `android_control.parquet`.
    pub name: String,
    pub path: PathBuf,
    /// Inferred rule per column, in file order.
    pub columns: Vec<ColumnRule>,
    /// All rows, in on-disk order.
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn rule_of(&self, column: &str) -> Option<DecodingRule> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        let columns: Arc<[String]> = pairs.iter().map(|(n, _)| n.to_string()).collect();
        Record::new(columns, pairs.iter().map(|(_, v)| v.clone()).collect())
    }

    #[test]
    fn falsy_values_are_missing() {
        assert!(FieldValue::Text(String::new()).is_missing());
        assert!(FieldValue::Numbers(vec![]).is_missing());
        assert!(FieldValue::Null.is_missing());
        assert!(!FieldValue::Text("0".into()).is_missing());
        assert!(!FieldValue::Numbers(vec![0.0, 0.0]).is_missing());
    }

    #[test]
    fn masked_record_hides_binary_and_keeps_order() {
        let rec = record(&[
            ("instruction", FieldValue::Text("open settings".into())),
            ("image", FieldValue::Binary),
            ("gt_bbox", FieldValue::Numbers(vec![0.5, 1.0])),
            ("history", FieldValue::Null),
        ]);
        let masked = rec.masked();
        let keys: Vec<&str> = masked.keys().map(String::as_str).collect();
        assert_eq!(keys, ["instruction", "image", "gt_bbox", "history"]);
        assert_eq!(masked["image"], JsonValue::from(BINARY_PLACEHOLDER));
        assert_eq!(masked["gt_bbox"], serde_json::json!([0.5, 1.0]));
        assert_eq!(masked["history"], JsonValue::Null);
    }

    #[test]
    fn display_matches_report_conventions() {
        assert_eq!(FieldValue::Numbers(vec![1.0, 2.5]).to_string(), "[1.0, 2.5]");
        assert_eq!(FieldValue::Null.to_string(), "None");
        assert_eq!(FieldValue::Binary.to_string(), BINARY_PLACEHOLDER);
    }

    #[test]
    fn record_lookup_by_name() {
        let rec = record(&[("a", FieldValue::Text("x".into()))]);
        assert!(rec.contains("a"));
        assert_eq!(rec.get("a").and_then(FieldValue::as_text), Some("x"));
        assert!(rec.get("b").is_none());
    }
}
