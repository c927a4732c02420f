//! Descriptive statistics over numeric columns.
//!
//! All statistics skip `Null` cells. A column with no usable values (or
//! fewer than two for the variance family) fails with
//! [`FrameError::EmptyColumn`] instead of producing NaN.

use std::collections::BTreeMap;

use super::column::ColumnKind;
use super::error::FrameError;
use super::frame::DataFrame;

impl DataFrame {
    /// Non-null values of a numeric column as `f64` (Int64 widened).
    fn numeric_values(&self, name: &str) -> Result<Vec<f64>, FrameError> {
        let col = self.column(name)?;
        if !col.kind().is_numeric() {
            return Err(FrameError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnKind::Float64,
                got: col.kind().to_string(),
            });
        }
        let values: Vec<f64> = col.values().iter().filter_map(|v| v.as_f64()).collect();
        if values.is_empty() {
            return Err(FrameError::EmptyColumn(name.to_string()));
        }
        Ok(values)
    }

    pub fn mean(&self, name: &str) -> Result<f64, FrameError> {
        let values = self.numeric_values(name)?;
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    pub fn median(&self, name: &str) -> Result<f64, FrameError> {
        self.quantile(name, 0.5)
    }

    pub fn min(&self, name: &str) -> Result<f64, FrameError> {
        Ok(self
            .numeric_values(name)?
            .into_iter()
            .fold(f64::INFINITY, f64::min))
    }

    pub fn max(&self, name: &str) -> Result<f64, FrameError> {
        Ok(self
            .numeric_values(name)?
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Quantile with linear interpolation between order statistics
    /// (matching `gsl_stats_quantile_from_sorted_data`, which the original
    /// delegates to). `q` must lie in `[0, 1]`.
    pub fn quantile(&self, name: &str, q: f64) -> Result<f64, FrameError> {
        if !(0.0..=1.0).contains(&q) {
            return Err(FrameError::InvalidQuantile(q));
        }
        let mut values = self.numeric_values(name)?;
        values.sort_by(f64::total_cmp);

        let pos = q * (values.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let frac = pos - lo as f64;
        if lo + 1 < values.len() {
            Ok(values[lo] + frac * (values[lo + 1] - values[lo]))
        } else {
            Ok(values[lo])
        }
    }

    /// Sample variance (n − 1 denominator); needs at least two values.
    pub fn var(&self, name: &str) -> Result<f64, FrameError> {
        let values = self.numeric_values(name)?;
        if values.len() < 2 {
            return Err(FrameError::EmptyColumn(name.to_string()));
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        Ok(ss / (values.len() - 1) as f64)
    }

    pub fn std_dev(&self, name: &str) -> Result<f64, FrameError> {
        Ok(self.var(name)?.sqrt())
    }

    /// Sample covariance over the rows where both cells are non-null.
    pub fn covariance(&self, a: &str, b: &str) -> Result<f64, FrameError> {
        let pairs = self.paired_values(a, b)?;
        let n = pairs.len() as f64;
        let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;
        let ss: f64 = pairs
            .iter()
            .map(|(x, y)| (x - mean_a) * (y - mean_b))
            .sum();
        Ok(ss / (n - 1.0))
    }

    /// Pearson correlation coefficient.
    pub fn correlation(&self, a: &str, b: &str) -> Result<f64, FrameError> {
        let pairs = self.paired_values(a, b)?;
        let n = pairs.len() as f64;
        let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;
        let mut ss_ab = 0.0;
        let mut ss_a = 0.0;
        let mut ss_b = 0.0;
        for (x, y) in &pairs {
            ss_ab += (x - mean_a) * (y - mean_b);
            ss_a += (x - mean_a) * (x - mean_a);
            ss_b += (y - mean_b) * (y - mean_b);
        }
        Ok(ss_ab / (ss_a.sqrt() * ss_b.sqrt()))
    }

    /// Frequency table of a column's values (any kind), keyed by their
    /// display form. `Null` cells are counted under `<null>`.
    pub fn value_counts(&self, name: &str) -> Result<BTreeMap<String, usize>, FrameError> {
        let col = self.column(name)?;
        let mut counts = BTreeMap::new();
        for v in col.values() {
            *counts.entry(v.to_string()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn paired_values(&self, a: &str, b: &str) -> Result<Vec<(f64, f64)>, FrameError> {
        let col_a = self.column(a)?;
        let col_b = self.column(b)?;
        for col in [col_a, col_b] {
            if !col.kind().is_numeric() {
                return Err(FrameError::TypeMismatch {
                    column: col.name().to_string(),
                    expected: ColumnKind::Float64,
                    got: col.kind().to_string(),
                });
            }
        }
        let pairs: Vec<(f64, f64)> = col_a
            .values()
            .iter()
            .zip(col_b.values())
            .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
            .collect();
        if pairs.len() < 2 {
            return Err(FrameError::EmptyColumn(format!("{a}, {b}")));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::column::{Column, Value};

    fn frame() -> DataFrame {
        DataFrame::from_columns(vec![
            Column::from_f64s("x", vec![1.0, 2.0, 3.0, 4.0]),
            Column::from_f64s("y", vec![2.0, 4.0, 6.0, 8.0]),
            Column::from_strings(
                "tag",
                vec!["a".into(), "b".into(), "a".into(), "a".into()],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn basic_moments() {
        let df = frame();
        assert_eq!(df.mean("x").unwrap(), 2.5);
        assert_eq!(df.min("x").unwrap(), 1.0);
        assert_eq!(df.max("x").unwrap(), 4.0);
        // values 1..4: sample variance = 5/3
        assert!((df.var("x").unwrap() - 5.0 / 3.0).abs() < 1e-12);
        assert!((df.std_dev("x").unwrap() - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn quantiles_interpolate() {
        let df = frame();
        assert_eq!(df.median("x").unwrap(), 2.5);
        assert_eq!(df.quantile("x", 0.0).unwrap(), 1.0);
        assert_eq!(df.quantile("x", 1.0).unwrap(), 4.0);
        assert!((df.quantile("x", 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!(matches!(
            df.quantile("x", 1.5),
            Err(FrameError::InvalidQuantile(_))
        ));
    }

    #[test]
    fn covariance_and_correlation() {
        let df = frame();
        // y = 2x: cov = 2 * var(x), corr = 1
        assert!((df.covariance("x", "y").unwrap() - 10.0 / 3.0).abs() < 1e-12);
        assert!((df.correlation("x", "y").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nulls_are_skipped() {
        let df = DataFrame::from_columns(vec![Column::new(
            "a",
            ColumnKind::Float64,
            vec![Value::Float(1.0), Value::Null, Value::Float(3.0)],
        )
        .unwrap()])
        .unwrap();
        assert_eq!(df.mean("a").unwrap(), 2.0);
    }

    #[test]
    fn non_numeric_and_empty_columns_fail() {
        let df = frame();
        assert!(matches!(
            df.mean("tag"),
            Err(FrameError::TypeMismatch { .. })
        ));

        let empty = DataFrame::from_columns(vec![Column::new(
            "a",
            ColumnKind::Float64,
            vec![Value::Null, Value::Null],
        )
        .unwrap()])
        .unwrap();
        assert!(matches!(empty.mean("a"), Err(FrameError::EmptyColumn(_))));
    }

    #[test]
    fn value_counts_by_display_form() {
        let df = frame();
        let counts = df.value_counts("tag").unwrap();
        assert_eq!(counts.get("a"), Some(&3));
        assert_eq!(counts.get("b"), Some(&1));
    }
}
