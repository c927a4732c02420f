use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FrameError;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the scalar types a scripting
/// host hands across the boundary.
///
/// `Null` is the missing-value sentinel and conforms to every column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
    Null,
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Float(_) => "Float64",
            Value::Int(_) => "Int64",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Null => "Null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell. `Int` widens to `f64`; `Null` is `None`;
    /// non-numeric variants are also `None` (callers check the column kind
    /// first).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – the declared scalar type of a column
// ---------------------------------------------------------------------------

/// Declared scalar type of a [`Column`]. Closed set; mixed-kind columns are
/// rejected at construction rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Float64,
    Int64,
    Bool,
    String,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Float64 | ColumnKind::Int64)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Float64 => "Float64",
            ColumnKind::Int64 => "Int64",
            ColumnKind::Bool => "Bool",
            ColumnKind::String => "String",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Column – a named, homogeneously typed sequence
// ---------------------------------------------------------------------------

/// A single named column. Invariant: every value conforms to `kind`
/// (`Null` conforms to any kind; `Int` cells are widened on insertion into
/// a `Float64` column — the only implicit numeric widening).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    /// Build a column, checking every value against `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: ColumnKind,
        values: Vec<Value>,
    ) -> Result<Self, FrameError> {
        let name = name.into();
        let mut checked = Vec::with_capacity(values.len());
        for v in values {
            checked.push(conform(&name, kind, v)?);
        }
        Ok(Column {
            name,
            kind,
            values: checked,
        })
    }

    pub fn from_f64s(name: impl Into<String>, values: Vec<f64>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::Float64,
            values: values.into_iter().map(Value::Float).collect(),
        }
    }

    pub fn from_i64s(name: impl Into<String>, values: Vec<i64>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::Int64,
            values: values.into_iter().map(Value::Int).collect(),
        }
    }

    pub fn from_bools(name: impl Into<String>, values: Vec<bool>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::Bool,
            values: values.into_iter().map(Value::Bool).collect(),
        }
    }

    pub fn from_strings(name: impl Into<String>, values: Vec<String>) -> Self {
        Column {
            name: name.into(),
            kind: ColumnKind::String,
            values: values.into_iter().map(Value::Str).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    pub fn get(&self, index: usize) -> Result<&Value, FrameError> {
        self.values.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Replace the cell at `index`, with the same bounds and kind checks as
    /// construction.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), FrameError> {
        let len = self.values.len();
        if index >= len {
            return Err(FrameError::IndexOutOfRange { index, len });
        }
        self.values[index] = conform(&self.name, self.kind, value)?;
        Ok(())
    }

    /// Numeric cell as `f64` (`Int` widened, `Null` as `None`). Fails when
    /// the column kind itself is non-numeric.
    pub fn as_f64(&self, index: usize) -> Result<Option<f64>, FrameError> {
        if !self.kind.is_numeric() {
            return Err(FrameError::TypeMismatch {
                column: self.name.clone(),
                expected: ColumnKind::Float64,
                got: self.kind.to_string(),
            });
        }
        Ok(self.get(index)?.as_f64())
    }

    /// Produce a new column with every value converted to `target`.
    ///
    /// Allowed conversions: `Int64 ⇄ Float64` (truncating toward zero on the
    /// way down), `Bool → Int64/Float64`, any kind to `String`. `Null`
    /// always casts to `Null`. Everything else is [`FrameError::UnsupportedCast`];
    /// in particular `String` never parses implicitly.
    pub fn cast(&self, target: ColumnKind) -> Result<Column, FrameError> {
        if target == self.kind {
            return Ok(self.clone());
        }
        let unsupported = || FrameError::UnsupportedCast {
            from: self.kind,
            to: target,
        };
        let mut values = Vec::with_capacity(self.values.len());
        for v in &self.values {
            let converted = match (v, target) {
                (Value::Null, _) => Value::Null,
                (v, ColumnKind::String) => Value::Str(v.to_string()),
                (Value::Int(i), ColumnKind::Float64) => Value::Float(*i as f64),
                (Value::Float(f), ColumnKind::Int64) => Value::Int(*f as i64),
                (Value::Bool(b), ColumnKind::Int64) => Value::Int(*b as i64),
                (Value::Bool(b), ColumnKind::Float64) => Value::Float(*b as i64 as f64),
                _ => return Err(unsupported()),
            };
            values.push(converted);
        }
        Ok(Column {
            name: self.name.clone(),
            kind: target,
            values,
        })
    }

    /// Keep only the rows at `indices` (used by the frame's row operations).
    pub(crate) fn take_rows(&self, indices: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            kind: self.kind,
            values: indices.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }
}

/// Check one value against a column kind, widening `Int` into `Float64`.
fn conform(column: &str, kind: ColumnKind, value: Value) -> Result<Value, FrameError> {
    let ok = match (&value, kind) {
        (Value::Null, _) => true,
        (Value::Float(_), ColumnKind::Float64) => true,
        (Value::Int(_), ColumnKind::Int64) => true,
        (Value::Int(i), ColumnKind::Float64) => return Ok(Value::Float(*i as f64)),
        (Value::Bool(_), ColumnKind::Bool) => true,
        (Value::Str(_), ColumnKind::String) => true,
        _ => false,
    };
    if ok {
        Ok(value)
    } else {
        Err(FrameError::TypeMismatch {
            column: column.to_string(),
            expected: kind,
            got: value.kind_name().to_string(),
        })
    }
}
