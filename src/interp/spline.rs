//! Natural cubic spline fitting.
//!
//! Boundary condition: **natural** — the second derivative is zero at both
//! end knots. The interior second-derivative coefficients come from one
//! tridiagonal system, solved here with the Thomas algorithm; evaluation
//! then uses per-segment cubic coefficients.

use super::error::InterpError;
use super::model::{spacings, FittedModel};

/// Fit a natural cubic spline. Caller guarantees at least 4 strictly
/// increasing points.
pub(crate) fn fit(xs: &[f64], ys: &[f64]) -> Result<FittedModel, InterpError> {
    let n = xs.len();
    let h = spacings(xs);

    // tridiagonal system for the interior c coefficients:
    //   sub   a[k] = h[k]
    //   diag  b[k] = 2(h[k] + h[k+1])
    //   super c[k] = h[k+1]
    //   rhs[k] = 3[(y[k+2]-y[k+1])/h[k+1] - (y[k+1]-y[k])/h[k]]
    let m = n - 2;
    let mut diag = vec![0.0; m];
    let mut rhs = vec![0.0; m];
    for k in 0..m {
        diag[k] = 2.0 * (h[k] + h[k + 1]);
        rhs[k] = 3.0 * ((ys[k + 2] - ys[k + 1]) / h[k + 1] - (ys[k + 1] - ys[k]) / h[k]);
    }

    // Thomas sweep: eliminate the subdiagonal, then back-substitute.
    for k in 1..m {
        let w = h[k] / diag[k - 1];
        diag[k] -= w * h[k];
        rhs[k] -= w * rhs[k - 1];
    }
    let mut c = vec![0.0; n];
    c[m] = rhs[m - 1] / diag[m - 1];
    for k in (0..m - 1).rev() {
        c[k + 1] = (rhs[k] - h[k + 1] * c[k + 2]) / diag[k];
    }
    // natural boundary: c[0] = c[n-1] = 0 (already zeroed)

    let mut b = vec![0.0; n - 1];
    let mut d = vec![0.0; n - 1];
    for i in 0..n - 1 {
        b[i] = (ys[i + 1] - ys[i]) / h[i] - h[i] * (2.0 * c[i] + c[i + 1]) / 3.0;
        d[i] = (c[i + 1] - c[i]) / (3.0 * h[i]);
    }
    c.truncate(n - 1);

    if b.iter().chain(&c).chain(&d).any(|v| !v.is_finite()) {
        return Err(InterpError::DegenerateInput(
            "spline system produced non-finite coefficients".into(),
        ));
    }
    Ok(FittedModel::Segments { b, c, d })
}
