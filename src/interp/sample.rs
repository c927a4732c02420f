//! Validated (x, y) samples — the input contract for fitting.

use crate::frame::{ColumnKind, DataFrame, FrameError};

use super::error::InterpError;

/// An immutable, ascending-by-x collection of (x, y) pairs with strictly
/// unique abscissae. Duplicate x values are rejected, never averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleSet {
    /// Pair two numeric columns of a frame by row index.
    ///
    /// Rows where either cell is `Null` or NaN are treated as missing and
    /// dropped before sorting; everything else follows
    /// [`SampleSet::from_pairs`]. Column lengths are checked defensively
    /// even though the frame invariant already guarantees them.
    pub fn from_frame(df: &DataFrame, x_column: &str, y_column: &str) -> Result<Self, InterpError> {
        let x_col = df.column(x_column)?;
        let y_col = df.column(y_column)?;
        for col in [x_col, y_col] {
            if !col.kind().is_numeric() {
                return Err(FrameError::TypeMismatch {
                    column: col.name().to_string(),
                    expected: ColumnKind::Float64,
                    got: col.kind().to_string(),
                }
                .into());
            }
        }
        if x_col.len() != y_col.len() {
            return Err(InterpError::LengthMismatch {
                x_len: x_col.len(),
                y_len: y_col.len(),
            });
        }

        let mut pairs = Vec::with_capacity(x_col.len());
        let mut dropped = 0usize;
        for (x, y) in x_col.values().iter().zip(y_col.values()) {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => pairs.push((x, y)),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            log::debug!("sample extraction dropped {dropped} rows with missing values");
        }
        Self::from_sorted_pairs(pairs)
    }

    /// Build from two raw slices. Explicitly supplied points carry no
    /// missing-value convention, so non-finite values are an error rather
    /// than silently dropped.
    pub fn from_pairs(xs: &[f64], ys: &[f64]) -> Result<Self, InterpError> {
        if xs.len() != ys.len() {
            return Err(InterpError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(InterpError::DegenerateInput(format!(
                    "non-finite value at index {i}"
                )));
            }
        }
        Self::from_sorted_pairs(xs.iter().copied().zip(ys.iter().copied()).collect())
    }

    fn from_sorted_pairs(mut pairs: Vec<(f64, f64)>) -> Result<Self, InterpError> {
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(InterpError::DuplicateAbscissa(window[0].0));
            }
        }
        if pairs.len() < 2 {
            return Err(InterpError::InsufficientPoints {
                got: pairs.len(),
                needed: 2,
            });
        }
        let (xs, ys) = pairs.into_iter().unzip();
        Ok(SampleSet { xs, ys })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Abscissae, ascending.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// `(x_min, x_max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Column, Value};

    #[test]
    fn from_pairs_sorts_by_x() {
        let s = SampleSet::from_pairs(&[2.0, 0.0, 1.0], &[4.0, 0.0, 1.0]).unwrap();
        assert_eq!(s.xs(), &[0.0, 1.0, 2.0]);
        assert_eq!(s.ys(), &[0.0, 1.0, 4.0]);
        assert_eq!(s.domain(), (0.0, 2.0));
    }

    #[test]
    fn duplicate_x_is_rejected() {
        let result = SampleSet::from_pairs(&[1.0, 1.0, 2.0], &[0.0, 0.0, 1.0]);
        assert!(matches!(result, Err(InterpError::DuplicateAbscissa(x)) if x == 1.0));
    }

    #[test]
    fn length_mismatch_and_minimum() {
        assert!(matches!(
            SampleSet::from_pairs(&[1.0, 2.0], &[1.0]),
            Err(InterpError::LengthMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(matches!(
            SampleSet::from_pairs(&[1.0], &[1.0]),
            Err(InterpError::InsufficientPoints { got: 1, needed: 2 })
        ));
    }

    #[test]
    fn from_pairs_rejects_non_finite() {
        assert!(matches!(
            SampleSet::from_pairs(&[0.0, f64::NAN], &[1.0, 2.0]),
            Err(InterpError::DegenerateInput(_))
        ));
        assert!(matches!(
            SampleSet::from_pairs(&[0.0, 1.0], &[1.0, f64::INFINITY]),
            Err(InterpError::DegenerateInput(_))
        ));
    }

    #[test]
    fn from_frame_drops_missing_rows() {
        let df = DataFrame::from_columns(vec![
            Column::new(
                "x",
                ColumnKind::Float64,
                vec![
                    Value::Float(3.0),
                    Value::Null,
                    Value::Float(1.0),
                    Value::Float(2.0),
                ],
            )
            .unwrap(),
            Column::new(
                "y",
                ColumnKind::Float64,
                vec![
                    Value::Float(9.0),
                    Value::Float(0.0),
                    Value::Float(1.0),
                    Value::Float(f64::NAN),
                ],
            )
            .unwrap(),
        ])
        .unwrap();

        let s = SampleSet::from_frame(&df, "x", "y").unwrap();
        assert_eq!(s.xs(), &[1.0, 3.0]);
        assert_eq!(s.ys(), &[1.0, 9.0]);
    }

    #[test]
    fn from_frame_widens_int_columns() {
        let df = DataFrame::from_columns(vec![
            Column::from_i64s("x", vec![0, 1, 2]),
            Column::from_i64s("y", vec![0, 1, 4]),
        ])
        .unwrap();
        let s = SampleSet::from_frame(&df, "x", "y").unwrap();
        assert_eq!(s.xs(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn from_frame_column_errors() {
        let df = DataFrame::from_columns(vec![
            Column::from_f64s("x", vec![0.0, 1.0]),
            Column::from_strings("tag", vec!["a".into(), "b".into()]),
        ])
        .unwrap();

        assert!(matches!(
            SampleSet::from_frame(&df, "x", "z"),
            Err(InterpError::Frame(FrameError::ColumnNotFound(_)))
        ));
        assert!(matches!(
            SampleSet::from_frame(&df, "x", "tag"),
            Err(InterpError::Frame(FrameError::TypeMismatch { .. }))
        ));
    }
}
