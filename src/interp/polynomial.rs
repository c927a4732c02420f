//! Global polynomial fitting via Newton divided differences.
//!
//! A single degree n−1 polynomial through all n points. Evaluation stays
//! in the Newton form (Horner nesting, the numerically kinder option); the
//! expanded power basis is kept alongside for closed-form derivatives and
//! integrals. Divided differences degrade for large n — fits past degree
//! 30 are accepted but logged as a warning.

use super::error::InterpError;
use super::model::FittedModel;

/// Degree above which a warning is emitted at fit time.
const DEGRADATION_DEGREE: usize = 30;

/// Fit a global interpolating polynomial. Caller guarantees at least 2
/// strictly increasing points.
pub(crate) fn fit(xs: &[f64], ys: &[f64]) -> Result<FittedModel, InterpError> {
    let n = xs.len();
    if n - 1 > DEGRADATION_DEGREE {
        log::warn!(
            "polynomial fit of degree {} — divided differences are unstable at this size",
            n - 1
        );
    }

    // c[i] = f[x_0, ..., x_i], built in place column by column
    let mut newton = ys.to_vec();
    for j in 1..n {
        for i in (j..n).rev() {
            newton[i] = (newton[i] - newton[i - 1]) / (xs[i] - xs[i - j]);
        }
    }

    let power = newton_to_power(&newton, xs);
    if newton.iter().chain(&power).any(|v| !v.is_finite()) {
        return Err(InterpError::DegenerateInput(
            "divided differences produced non-finite coefficients".into(),
        ));
    }
    Ok(FittedModel::Polynomial { newton, power })
}

/// Expand the Newton form into ascending monomial coefficients by running
/// Horner's nesting symbolically: p ← p·(x − x_j) + c[j].
fn newton_to_power(newton: &[f64], xs: &[f64]) -> Vec<f64> {
    let n = newton.len();
    let mut power = vec![0.0; n];
    power[0] = newton[n - 1];
    let mut degree = 0;
    for j in (0..n - 1).rev() {
        // multiply by (x - xs[j]): shift up, subtract xs[j] * old
        for k in (1..=degree + 1).rev() {
            power[k] = power[k - 1] - xs[j] * power[k];
        }
        power[0] = newton[j] - xs[j] * power[0];
        degree += 1;
    }
    power
}
