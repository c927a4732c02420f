//! JSON document contract: one object mapping column name → array of
//! scalars, all arrays equal length, key order == column order.
//!
//! Column kinds are inferred on import (all-integer → Int64, any float among
//! numerics → Float64, all-boolean → Bool, all-string → String) and exported
//! as native JSON scalars. `null` is the missing-value representation in
//! both directions; an all-null array infers Float64. Mixing numeric cells
//! with strings or booleans in one array is malformed, never coerced.

use serde_json::{Map, Value as JsonValue};

use super::column::{Column, ColumnKind, Value};
use super::error::FrameError;
use super::frame::DataFrame;

impl DataFrame {
    /// Parse a columnar JSON document. Fails with
    /// [`FrameError::MalformedDocument`] on a non-object root, non-array
    /// columns, ragged lengths, or mixed-kind arrays.
    pub fn from_json(text: &str) -> Result<Self, FrameError> {
        let root: JsonValue = serde_json::from_str(text)
            .map_err(|e| FrameError::MalformedDocument(e.to_string()))?;
        Self::from_json_value(&root)
    }

    /// Same as [`DataFrame::from_json`], starting from an already parsed
    /// value (the shape a binding layer typically holds).
    pub fn from_json_value(root: &JsonValue) -> Result<Self, FrameError> {
        let object = root.as_object().ok_or_else(|| {
            FrameError::MalformedDocument("expected a top-level JSON object".into())
        })?;

        let mut expected_len: Option<usize> = None;
        let mut columns = Vec::with_capacity(object.len());
        for (name, value) in object {
            let array = value.as_array().ok_or_else(|| {
                FrameError::MalformedDocument(format!("column '{name}' is not an array"))
            })?;
            match expected_len {
                None => expected_len = Some(array.len()),
                Some(len) if len != array.len() => {
                    return Err(FrameError::MalformedDocument(format!(
                        "ragged document: column '{name}' has {} values, expected {len}",
                        array.len()
                    )));
                }
                Some(_) => {}
            }
            columns.push(column_from_array(name, array)?);
        }

        let df = DataFrame::from_columns(columns)?;
        log::debug!(
            "parsed JSON document: {} rows x {} columns",
            df.row_count(),
            df.column_count()
        );
        Ok(df)
    }

    /// Serialize to the columnar JSON document, preserving column order.
    /// Non-finite floats have no JSON representation and are written as
    /// `null`.
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    pub fn to_json_value(&self) -> JsonValue {
        let mut object = Map::with_capacity(self.column_count());
        for col in self.columns() {
            let array: Vec<JsonValue> = col.values().iter().map(cell_to_json).collect();
            object.insert(col.name().to_string(), JsonValue::Array(array));
        }
        JsonValue::Object(object)
    }
}

fn cell_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Int(i) => JsonValue::Number((*i).into()),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Str(s) => JsonValue::String(s.clone()),
        Value::Null => JsonValue::Null,
    }
}

/// Infer the kind of one column array and build the column.
fn column_from_array(name: &str, array: &[JsonValue]) -> Result<Column, FrameError> {
    let mut saw_int = false;
    let mut saw_float = false;
    let mut saw_bool = false;
    let mut saw_str = false;

    for cell in array {
        match cell {
            JsonValue::Null => {}
            JsonValue::Number(n) => {
                if n.as_i64().is_some() {
                    saw_int = true;
                } else {
                    saw_float = true;
                }
            }
            JsonValue::Bool(_) => saw_bool = true,
            JsonValue::String(_) => saw_str = true,
            other => {
                return Err(FrameError::MalformedDocument(format!(
                    "column '{name}' contains a non-scalar value: {other}"
                )));
            }
        }
    }

    let numeric = saw_int || saw_float;
    if (saw_str && (numeric || saw_bool)) || (saw_bool && numeric) {
        return Err(FrameError::MalformedDocument(format!(
            "column '{name}' mixes incompatible scalar kinds"
        )));
    }

    let kind = if saw_str {
        ColumnKind::String
    } else if saw_bool {
        ColumnKind::Bool
    } else if saw_float {
        ColumnKind::Float64
    } else if saw_int {
        ColumnKind::Int64
    } else {
        // all-null column: no evidence either way, default to Float64
        ColumnKind::Float64
    };

    let values: Vec<Value> = array
        .iter()
        .map(|cell| match cell {
            JsonValue::Null => Value::Null,
            JsonValue::Number(n) => match (kind, n.as_i64()) {
                (ColumnKind::Int64, Some(i)) => Value::Int(i),
                // Float64 column: integers widen, huge u64s fall back to f64
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::String(s) => Value::Str(s.clone()),
            _ => unreachable!("non-scalar rejected during inference"),
        })
        .collect();

    Column::new(name, kind, values)
}
