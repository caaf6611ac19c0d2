//! Row abstraction for tabular data.
//!
//! The table widget is generic over the shape of its rows. Anything that can
//! answer "what is the value of field `key`?" and "what is your identity?"
//! can be displayed, sorted and selected. A ready-made implementation for
//! `serde_json::Value` objects lets callers use ad-hoc JSON rows without
//! defining a type.

use std::cmp::Ordering;
use std::fmt;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A single cell value extracted from a row.
///
/// Values are compared with their type's natural ordering. Values of
/// different types fall back to a fixed rank (null < bool < number < text),
/// so sorting a column with mixed types is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null field. Displays as an empty string.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Compare two cell values for sorting.
    ///
    /// Same-type pairs use the type's native ordering (floats by total
    /// order); `Int` and `Float` compare numerically with each other.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Rank used to order values of different types.
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(v: &serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => CellValue::Text(s.clone()),
            // Nested structures degrade to their JSON text form.
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// A displayable table row.
///
/// `field` is permissive: unknown keys return [`CellValue::Null`] rather
/// than failing, so a column referencing an absent field simply renders
/// empty. `identity` keys the selection set; it should be stable for the
/// lifetime of the row (an id field, or a content hash for value-like rows).
pub trait TableRow {
    /// Look up the value of a named field.
    fn field(&self, key: &str) -> CellValue;

    /// Stable identity used to track selection across reordering.
    fn identity(&self) -> String;
}

impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map(CellValue::from).unwrap_or(CellValue::Null)
    }

    /// The `"id"` field when present and non-null, else a content hash.
    fn identity(&self) -> String {
        match self.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(v) if !v.is_null() => v.to_string(),
            _ => {
                // serde_json maps serialize with sorted keys, so the text
                // form is a canonical basis for a content hash.
                let mut hasher = DefaultHasher::new();
                self.to_string().hash(&mut hasher);
                format!("#{:016x}", hasher.finish())
            }
        }
    }
}
