use serde::{Deserialize, Serialize};

use crate::frame::DataFrame;

use super::akima;
use super::error::InterpError;
use super::model::FittedModel;
use super::polynomial;
use super::sample::SampleSet;
use super::spline;

// ---------------------------------------------------------------------------
// Method / Extrapolate – fit configuration
// ---------------------------------------------------------------------------

/// Interpolation method. Each carries its own minimum sample count; falling
/// below it fails the fit — a simpler method is never substituted silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Piecewise linear between consecutive points.
    Linear,
    /// One global polynomial of degree n−1 (Newton form). Numerically
    /// unstable for large n; fits past degree 30 log a warning.
    Polynomial,
    /// Natural cubic spline (zero second derivative at both ends), C².
    CubicSpline,
    /// Akima spline: C¹, resistant to oscillation near outliers.
    Akima,
}

impl Method {
    /// Minimum number of samples required by the method.
    pub fn min_points(self) -> usize {
        match self {
            Method::Linear | Method::Polynomial => 2,
            Method::CubicSpline => 4,
            Method::Akima => 5,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Method::Linear => "linear",
            Method::Polynomial => "polynomial",
            Method::CubicSpline => "cubic spline",
            Method::Akima => "akima",
        }
    }
}

/// Behaviour for query points outside the fitted domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolate {
    /// Fail with [`InterpError::OutOfDomain`].
    Error,
    /// Return the boundary value.
    Clamp,
    /// Extend along the tangent of the nearest boundary segment.
    Linear,
}

// ---------------------------------------------------------------------------
// Interpolator – an immutable fitted snapshot
// ---------------------------------------------------------------------------

/// A fitted interpolant over a [`SampleSet`].
///
/// Fitting happens in the constructor and is the only computation with side
/// effects; the result is an immutable snapshot, so `evaluate` takes
/// `&self` and is safe to call from concurrent readers. Re-fitting means
/// constructing a new `Interpolator` and swapping it in (replace-on-refit),
/// never mutating a model that readers may be using.
#[derive(Debug, Clone)]
pub struct Interpolator {
    method: Method,
    policy: Extrapolate,
    samples: SampleSet,
    model: FittedModel,
}

impl Interpolator {
    /// Fit `method` to the samples. Fails with
    /// [`InterpError::InsufficientPoints`] below the method minimum and
    /// [`InterpError::DegenerateInput`] when the fit produces non-finite
    /// coefficients.
    pub fn fit(
        samples: SampleSet,
        method: Method,
        policy: Extrapolate,
    ) -> Result<Self, InterpError> {
        let needed = method.min_points();
        if samples.len() < needed {
            return Err(InterpError::InsufficientPoints {
                got: samples.len(),
                needed,
            });
        }
        log::debug!(
            "fitting {} to {} points on [{}, {}]",
            method.name(),
            samples.len(),
            samples.domain().0,
            samples.domain().1
        );

        let xs = samples.xs();
        let ys = samples.ys();
        let model = match method {
            Method::Linear => fit_linear(xs, ys),
            Method::Polynomial => polynomial::fit(xs, ys)?,
            Method::CubicSpline => spline::fit(xs, ys)?,
            Method::Akima => akima::fit(xs, ys)?,
        };

        Ok(Interpolator {
            method,
            policy,
            samples,
            model,
        })
    }

    /// Convenience for the binding surface: extract two columns and fit in
    /// one step.
    pub fn from_frame(
        df: &DataFrame,
        x_column: &str,
        y_column: &str,
        method: Method,
        policy: Extrapolate,
    ) -> Result<Self, InterpError> {
        Self::fit(SampleSet::from_frame(df, x_column, y_column)?, method, policy)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn policy(&self) -> Extrapolate {
        self.policy
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// `(x_min, x_max)` of the fitted domain.
    pub fn domain(&self) -> (f64, f64) {
        self.samples.domain()
    }

    /// Evaluate at one point. Inside the domain the fitted function is
    /// evaluated exactly; outside, the extrapolation policy decides.
    pub fn evaluate(&self, x: f64) -> Result<f64, InterpError> {
        let (x_min, x_max) = self.domain();
        if x >= x_min && x <= x_max {
            return Ok(self.model.eval(self.samples.xs(), self.samples.ys(), x));
        }
        match self.policy {
            Extrapolate::Error => Err(InterpError::OutOfDomain {
                point: x,
                min: x_min,
                max: x_max,
            }),
            Extrapolate::Clamp => Ok(self.boundary_value(x)),
            Extrapolate::Linear => {
                let xb = if x < x_min { x_min } else { x_max };
                let slope = self.model.derivative(self.samples.xs(), xb, 1);
                Ok(self.boundary_value(x) + slope * (x - xb))
            }
        }
    }

    /// Evaluate many points, results in input order. Fail-fast: under the
    /// `Error` policy a single out-of-domain point fails the whole batch
    /// (there is no partial-results variant).
    pub fn evaluate_batch(&self, xs: &[f64]) -> Result<Vec<f64>, InterpError> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// `order`-th derivative at `x`. Order 0 is plain evaluation.
    ///
    /// `Linear` has a well-defined first derivative (the slope of the
    /// containing segment; at interior knots the right-hand segment is
    /// used) but its higher derivatives are undefined at the knots, so
    /// order ≥ 2 fails with [`InterpError::UnsupportedOperation`] rather
    /// than reporting zero. Out-of-domain points follow the policy: `Error`
    /// fails, `Clamp` extends with a constant (derivative 0), `Linear`
    /// extends with the boundary tangent (order 1, higher orders 0).
    pub fn derivative(&self, x: f64, order: u32) -> Result<f64, InterpError> {
        if order == 0 {
            return self.evaluate(x);
        }
        if self.method == Method::Linear && order >= 2 {
            return Err(InterpError::UnsupportedOperation(format!(
                "order-{order} derivative of a piecewise linear interpolant"
            )));
        }
        let (x_min, x_max) = self.domain();
        if x >= x_min && x <= x_max {
            return Ok(self.model.derivative(self.samples.xs(), x, order));
        }
        match self.policy {
            Extrapolate::Error => Err(InterpError::OutOfDomain {
                point: x,
                min: x_min,
                max: x_max,
            }),
            Extrapolate::Clamp => Ok(0.0),
            Extrapolate::Linear => {
                if order >= 2 {
                    return Ok(0.0);
                }
                let xb = if x < x_min { x_min } else { x_max };
                Ok(self.model.derivative(self.samples.xs(), xb, 1))
            }
        }
    }

    /// Exact integral of the fitted function over `[a, b]`.
    ///
    /// Both bounds must lie within the domain under every policy —
    /// extrapolated mass is never fabricated. `a > b` returns the negated
    /// integral.
    pub fn integral(&self, a: f64, b: f64) -> Result<f64, InterpError> {
        let (x_min, x_max) = self.domain();
        for bound in [a, b] {
            if bound < x_min || bound > x_max {
                return Err(InterpError::OutOfDomain {
                    point: bound,
                    min: x_min,
                    max: x_max,
                });
            }
        }
        if a > b {
            return Ok(-self.integral(b, a)?);
        }
        Ok(self
            .model
            .integrate(self.samples.xs(), self.samples.ys(), a, b))
    }

    fn boundary_value(&self, x: f64) -> f64 {
        let ys = self.samples.ys();
        if x < self.samples.xs()[0] {
            ys[0]
        } else {
            ys[ys.len() - 1]
        }
    }
}

/// Piecewise linear "fit": per-segment slopes, zero curvature terms.
fn fit_linear(xs: &[f64], ys: &[f64]) -> FittedModel {
    let n = xs.len();
    let b: Vec<f64> = (0..n - 1)
        .map(|i| (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]))
        .collect();
    FittedModel::Segments {
        c: vec![0.0; b.len()],
        d: vec![0.0; b.len()],
        b,
    }
}
