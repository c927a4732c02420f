//! Akima spline fitting.
//!
//! Locally weighted slopes make the fit resistant to oscillation near
//! outliers; continuity is C¹ (not C² like the cubic spline). Boundary
//! slopes use Akima's parabolic extension of the secants. Where the slope
//! weights cancel (locally collinear data) the averaged secant is used,
//! matching the standard formulation.

use super::error::InterpError;
use super::model::{spacings, FittedModel};

/// Fit an Akima spline. Caller guarantees at least 5 strictly increasing
/// points.
pub(crate) fn fit(xs: &[f64], ys: &[f64]) -> Result<FittedModel, InterpError> {
    let n = xs.len();
    let h = spacings(xs);

    // secants m[i] for i = 0..n-1, extended two slots on each side:
    //   m[-2] = 3m[0] - 2m[1],    m[-1] = 2m[0] - m[1]
    //   m[n-1] = 2m[n-2] - m[n-3], m[n] = 3m[n-2] - 2m[n-3]
    let mut ext = Vec::with_capacity(n + 3);
    ext.push(0.0);
    ext.push(0.0);
    for i in 0..n - 1 {
        ext.push((ys[i + 1] - ys[i]) / h[i]);
    }
    ext[0] = 3.0 * ext[2] - 2.0 * ext[3];
    ext[1] = 2.0 * ext[2] - ext[3];
    let m_last = ext[n];
    let m_prev = ext[n - 1];
    ext.push(2.0 * m_last - m_prev);
    ext.push(3.0 * m_last - 2.0 * m_prev);

    // slope at knot i: weighted by the spread of neighbouring secants
    let mut t = Vec::with_capacity(n);
    for i in 0..n {
        let w1 = (ext[i + 3] - ext[i + 2]).abs();
        let w2 = (ext[i + 1] - ext[i]).abs();
        let denom = w1 + w2;
        let slope = if denom > f64::EPSILON {
            (w1 * ext[i + 1] + w2 * ext[i + 2]) / denom
        } else {
            0.5 * (ext[i + 1] + ext[i + 2])
        };
        t.push(slope);
    }

    // Hermite segment (y_i, y_{i+1}, t_i, t_{i+1}) in power basis
    let mut b = Vec::with_capacity(n - 1);
    let mut c = Vec::with_capacity(n - 1);
    let mut d = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let s = ext[i + 2]; // secant of segment i
        b.push(t[i]);
        c.push((3.0 * s - 2.0 * t[i] - t[i + 1]) / h[i]);
        d.push((t[i] + t[i + 1] - 2.0 * s) / (h[i] * h[i]));
    }

    if b.iter().chain(&c).chain(&d).any(|v| !v.is_finite()) {
        return Err(InterpError::DegenerateInput(
            "akima slopes produced non-finite coefficients".into(),
        ));
    }
    Ok(FittedModel::Segments { b, c, d })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn akima_passes_through_knots() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 2.0, 1.5, 0.5];
        let model = fit(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(&ys) {
            assert!((model.eval(&xs, &ys, x) - y).abs() < 1e-10);
        }
    }

    #[test]
    fn akima_reproduces_straight_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 3.0, 5.0, 7.0, 9.0];
        let model = fit(&xs, &ys).unwrap();
        for x in [0.5, 1.5, 2.5, 3.5] {
            assert!((model.eval(&xs, &ys, x) - (1.0 + 2.0 * x)).abs() < 1e-10);
        }
    }

    #[test]
    fn akima_stays_flat_next_to_an_outlier_free_plateau() {
        // classic Akima property: flat data stays flat even with a step
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let model = fit(&xs, &ys).unwrap();
        assert!(model.eval(&xs, &ys, 1.5).abs() < 1e-10);
        assert!((model.eval(&xs, &ys, 5.5) - 1.0).abs() < 1e-10);
    }
}
