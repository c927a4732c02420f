use std::fmt;

use super::column::{Column, Value};
use super::error::FrameError;

// ---------------------------------------------------------------------------
// DataFrame – ordered collection of equally long columns
// ---------------------------------------------------------------------------

/// Columnar container: an ordered set of uniquely named [`Column`]s sharing
/// one row count.
///
/// Column insertion order is preserved and observable (it fixes JSON/CSV
/// export order). Mutation is in place through `&mut self`; the borrow
/// checker enforces the single-writer/multiple-reader discipline, and the
/// row-producing operations (`select_columns`, `filter_rows`, `head`,
/// `drop_null_rows`) return new frames instead of mutating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
    row_count: usize,
}

impl DataFrame {
    /// An empty frame; the first added column decides the row count.
    pub fn new() -> Self {
        DataFrame::default()
    }

    /// Build a frame from columns in the given order.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, FrameError> {
        let mut df = DataFrame::new();
        for col in columns {
            df.add_column(col)?;
        }
        Ok(df)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Position of a named column.
    pub fn index_of(&self, name: &str) -> Result<usize, FrameError> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&Column, FrameError> {
        self.index_of(name).map(|i| &self.columns[i])
    }

    /// Whether the named column holds numeric data (Float64 or Int64).
    pub fn is_numeric(&self, name: &str) -> Result<bool, FrameError> {
        Ok(self.column(name)?.kind().is_numeric())
    }

    /// Append a column. An empty frame adopts the column's length as its
    /// row count; otherwise lengths must match exactly.
    pub fn add_column(&mut self, column: Column) -> Result<(), FrameError> {
        if self.columns.iter().any(|c| c.name() == column.name()) {
            return Err(FrameError::DuplicateName(column.name().to_string()));
        }
        if self.columns.is_empty() {
            self.row_count = column.len();
        } else if column.len() != self.row_count {
            return Err(FrameError::LengthMismatch {
                column: column.name().to_string(),
                expected: self.row_count,
                got: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Remove a column by name. Removing the last column resets the row
    /// count to zero.
    pub fn drop_column(&mut self, name: &str) -> Result<(), FrameError> {
        let idx = self.index_of(name)?;
        self.columns.remove(idx);
        if self.columns.is_empty() {
            self.row_count = 0;
        }
        Ok(())
    }

    /// New frame containing only the named columns, in the requested order.
    /// Any missing name fails the whole call; `self` is never modified.
    pub fn select_columns(&self, names: &[&str]) -> Result<DataFrame, FrameError> {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            selected.push(self.column(name)?.clone());
        }
        DataFrame::from_columns(selected)
    }

    pub fn get(&self, row: usize, name: &str) -> Result<&Value, FrameError> {
        self.column(name)?.get(row)
    }

    pub fn set(&mut self, row: usize, name: &str, value: Value) -> Result<(), FrameError> {
        let idx = self.index_of(name)?;
        self.columns[idx].set(row, value)
    }

    /// New frame with the rows for which `predicate` holds. O(N) scan;
    /// column order and kinds are preserved.
    pub fn filter_rows<P>(&self, predicate: P) -> DataFrame
    where
        P: Fn(&Row<'_>) -> bool,
    {
        let kept: Vec<usize> = (0..self.row_count)
            .filter(|&i| predicate(&Row { frame: self, index: i }))
            .collect();
        self.take_rows(&kept)
    }

    /// Remove one row in place.
    pub fn drop_row(&mut self, index: usize) -> Result<(), FrameError> {
        if index >= self.row_count {
            return Err(FrameError::IndexOutOfRange {
                index,
                len: self.row_count,
            });
        }
        let kept: Vec<usize> = (0..self.row_count).filter(|&i| i != index).collect();
        *self = self.take_rows(&kept);
        Ok(())
    }

    /// New frame without any row that contains a `Null` cell.
    pub fn drop_null_rows(&self) -> DataFrame {
        self.filter_rows(|row| {
            self.columns
                .iter()
                .all(|c| !c.values()[row.index].is_null())
        })
    }

    /// Per-column `Null` counts, in column order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// First `n` rows as a new frame.
    pub fn head(&self, n: usize) -> DataFrame {
        let kept: Vec<usize> = (0..self.row_count.min(n)).collect();
        self.take_rows(&kept)
    }

    fn take_rows(&self, indices: &[usize]) -> DataFrame {
        DataFrame {
            columns: self.columns.iter().map(|c| c.take_rows(indices)).collect(),
            row_count: indices.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Row – a borrowed view of one row, handed to filter predicates
// ---------------------------------------------------------------------------

/// Read-only view of one row of a [`DataFrame`].
pub struct Row<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell by column name, `None` for unknown columns.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.frame
            .column(name)
            .ok()
            .and_then(|c| c.values().get(self.index))
    }

    /// Numeric cell as `f64` (`None` for missing columns, nulls, and
    /// non-numeric cells).
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Display – fixed-width preview table
// ---------------------------------------------------------------------------

const DISPLAY_ROWS: usize = 10;

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(empty frame)");
        }
        let shown = self.row_count.min(DISPLAY_ROWS);

        // column widths over header plus the shown rows
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                let cells = c.values()[..shown]
                    .iter()
                    .map(|v| v.to_string().len())
                    .max()
                    .unwrap_or(0);
                c.name().len().max(cells)
            })
            .collect();

        for (col, w) in self.columns.iter().zip(&widths) {
            write!(f, "{:>w$}  ", col.name(), w = w)?;
        }
        writeln!(f)?;
        for row in 0..shown {
            for (col, w) in self.columns.iter().zip(&widths) {
                write!(f, "{:>w$}  ", col.values()[row].to_string(), w = w)?;
            }
            writeln!(f)?;
        }
        if self.row_count > shown {
            writeln!(f, "... {} more rows", self.row_count - shown)?;
        }
        Ok(())
    }
}
