//! CSV import/export.
//!
//! CSV carries no type information, so column kinds are inferred from the
//! text: a column whose every non-empty cell parses as `i64` becomes Int64,
//! as `f64` becomes Float64, as `true`/`false` becomes Bool; anything else
//! stays String. Empty cells are `Null`. Files without a header row get the
//! default names `Col1..ColN`.

use std::io::{Read, Write};
use std::path::Path;

use super::column::{Column, ColumnKind, Value};
use super::error::FrameError;
use super::frame::DataFrame;

impl DataFrame {
    /// Read CSV from any reader with a configurable separator.
    pub fn read_csv<R: Read>(
        reader: R,
        separator: u8,
        has_header: bool,
    ) -> Result<Self, FrameError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(separator)
            .has_headers(has_header)
            .from_reader(reader);

        let mut header: Vec<String> = if has_header {
            csv_reader.headers()?.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        // collect cells column-major
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); header.len()];
        for record in csv_reader.records() {
            let record = record?;
            if header.is_empty() {
                header = (1..=record.len()).map(|i| format!("Col{i}")).collect();
                cells = vec![Vec::new(); header.len()];
            }
            if record.len() != header.len() {
                return Err(FrameError::MalformedDocument(format!(
                    "csv row has {} fields, expected {}",
                    record.len(),
                    header.len()
                )));
            }
            for (col, field) in cells.iter_mut().zip(record.iter()) {
                col.push(field.trim().to_string());
            }
        }

        let columns: Vec<Column> = header
            .iter()
            .zip(&cells)
            .map(|(name, raw)| column_from_text(name, raw))
            .collect::<Result<_, _>>()?;

        let df = DataFrame::from_columns(columns)?;
        log::debug!(
            "parsed CSV: {} rows x {} columns",
            df.row_count(),
            df.column_count()
        );
        Ok(df)
    }

    /// Read a CSV file from disk. The original toolbox defaults to `,` and
    /// a header row; callers pass those explicitly here.
    pub fn read_csv_path(
        path: impl AsRef<Path>,
        separator: u8,
        has_header: bool,
    ) -> Result<Self, FrameError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        Self::read_csv(file, separator, has_header)
    }

    /// Write the frame as comma-separated CSV with a header row. `Null`
    /// cells become empty fields; whole floats keep a trailing `.0` so the
    /// column reads back as Float64.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), FrameError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.column_names())?;
        for row in 0..self.row_count() {
            let record: Vec<String> = self
                .columns()
                .iter()
                .map(|c| cell_to_text(&c.values()[row]))
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

fn cell_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{v:.1}"),
        other => other.to_string(),
    }
}

/// Decide a column kind from raw text cells, then parse them.
fn column_from_text(name: &str, raw: &[String]) -> Result<Column, FrameError> {
    let present: Vec<&String> = raw.iter().filter(|s| !s.is_empty()).collect();

    let all_int = !present.is_empty() && present.iter().all(|s| s.parse::<i64>().is_ok());
    let all_float = !present.is_empty() && present.iter().all(|s| s.parse::<f64>().is_ok());
    let all_bool = !present.is_empty() && present.iter().all(|s| *s == "true" || *s == "false");

    let kind = if all_int {
        ColumnKind::Int64
    } else if all_float {
        ColumnKind::Float64
    } else if all_bool {
        ColumnKind::Bool
    } else if present.is_empty() {
        ColumnKind::Float64
    } else {
        ColumnKind::String
    };

    let values: Vec<Value> = raw
        .iter()
        .map(|s| {
            if s.is_empty() {
                return Ok(Value::Null);
            }
            Ok(match kind {
                ColumnKind::Int64 => Value::Int(s.parse::<i64>().map_err(|_| bad_cell(name, s))?),
                ColumnKind::Float64 => {
                    Value::Float(s.parse::<f64>().map_err(|_| bad_cell(name, s))?)
                }
                ColumnKind::Bool => Value::Bool(s == "true"),
                ColumnKind::String => Value::Str(s.clone()),
            })
        })
        .collect::<Result<_, FrameError>>()?;

    Column::new(name, kind, values)
}

fn bad_cell(name: &str, cell: &str) -> FrameError {
    FrameError::MalformedDocument(format!("column '{name}': unparsable cell '{cell}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_with_header_infers_kinds() {
        let text = "x,count,tag,ok\n1.5,1,a,true\n2.5,2,b,false\n";
        let df = DataFrame::read_csv(text.as_bytes(), b',', true).unwrap();
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.column("x").unwrap().kind(), ColumnKind::Float64);
        assert_eq!(df.column("count").unwrap().kind(), ColumnKind::Int64);
        assert_eq!(df.column("tag").unwrap().kind(), ColumnKind::String);
        assert_eq!(df.column("ok").unwrap().kind(), ColumnKind::Bool);
    }

    #[test]
    fn read_without_header_uses_default_names() {
        let text = "1;2;3\n4;5;6\n";
        let df = DataFrame::read_csv(text.as_bytes(), b';', false).unwrap();
        assert_eq!(df.column_names(), vec!["Col1", "Col2", "Col3"]);
        assert_eq!(df.get(1, "Col2").unwrap(), &Value::Int(5));
    }

    #[test]
    fn empty_cells_become_null() {
        let text = "a,b\n1,\n,x\n";
        let df = DataFrame::read_csv(text.as_bytes(), b',', true).unwrap();
        assert_eq!(df.get(1, "a").unwrap(), &Value::Null);
        assert_eq!(df.get(0, "b").unwrap(), &Value::Null);
        assert_eq!(df.column("a").unwrap().kind(), ColumnKind::Int64);
        assert_eq!(df.column("b").unwrap().kind(), ColumnKind::String);
    }

    #[test]
    fn mixed_numeric_and_text_falls_back_to_string() {
        let text = "a\n1\noops\n";
        let df = DataFrame::read_csv(text.as_bytes(), b',', true).unwrap();
        assert_eq!(df.column("a").unwrap().kind(), ColumnKind::String);
    }

    #[test]
    fn round_trip() {
        let df = DataFrame::from_columns(vec![
            Column::from_f64s("x", vec![0.0, 1.5, 2.0]),
            Column::from_i64s("n", vec![1, 2, 3]),
            Column::from_strings("tag", vec!["a".into(), "b".into(), "c".into()]),
        ])
        .unwrap();

        let mut buffer = Vec::new();
        df.write_csv(&mut buffer).unwrap();
        let back = DataFrame::read_csv(buffer.as_slice(), b',', true).unwrap();
        assert_eq!(back, df);
    }
}
