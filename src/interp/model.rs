//! The immutable fitted state produced by a fit, and its closed-form
//! evaluation, differentiation, and integration.

/// Fitted model coefficients. Produced once at fit time; evaluation is
/// side-effect-free, so a fitted model can be read concurrently.
///
/// Piecewise methods (linear, cubic spline, Akima) all share the
/// `Segments` shape: segment `i` covers `[x[i], x[i+1]]` and evaluates as
/// `y[i] + b[i]·dx + c[i]·dx² + d[i]·dx³` with `dx = x − x[i]`. Linear fits
/// simply carry zero `c` and `d`. The global polynomial keeps both its
/// Newton coefficients (stable Horner evaluation) and the expanded power
/// basis (closed-form derivative/integral).
#[derive(Debug, Clone)]
pub(crate) enum FittedModel {
    Segments {
        b: Vec<f64>,
        c: Vec<f64>,
        d: Vec<f64>,
    },
    Polynomial {
        newton: Vec<f64>,
        power: Vec<f64>,
    },
}

impl FittedModel {
    /// Evaluate at `xq`, which must lie within `[xs[0], xs[n-1]]`.
    pub(crate) fn eval(&self, xs: &[f64], ys: &[f64], xq: f64) -> f64 {
        match self {
            FittedModel::Segments { b, c, d } => {
                let i = find_interval(xs, xq);
                let dx = xq - xs[i];
                ys[i] + b[i] * dx + c[i] * dx * dx + d[i] * dx * dx * dx
            }
            FittedModel::Polynomial { newton, .. } => newton_eval(newton, xs, xq),
        }
    }

    /// `order`-th derivative at `xq` (order ≥ 1, `xq` within the domain).
    /// Orders above the local polynomial degree are identically zero. At an
    /// interior knot the right-hand segment is used.
    pub(crate) fn derivative(&self, xs: &[f64], xq: f64, order: u32) -> f64 {
        match self {
            FittedModel::Segments { b, c, d } => {
                let i = find_interval(xs, xq);
                let dx = xq - xs[i];
                match order {
                    1 => b[i] + 2.0 * c[i] * dx + 3.0 * d[i] * dx * dx,
                    2 => 2.0 * c[i] + 6.0 * d[i] * dx,
                    3 => 6.0 * d[i],
                    _ => 0.0,
                }
            }
            FittedModel::Polynomial { power, .. } => {
                let mut coeffs = power.clone();
                for _ in 0..order {
                    coeffs = poly_differentiate(&coeffs);
                }
                poly_eval(&coeffs, xq)
            }
        }
    }

    /// Exact integral over `[a, b]` with `a ≤ b`, both within the domain.
    pub(crate) fn integrate(&self, xs: &[f64], ys: &[f64], a: f64, b: f64) -> f64 {
        match self {
            FittedModel::Segments {
                b: bc,
                c: cc,
                d: dc,
            } => {
                // antiderivative of segment i at local offset dx
                let prim = |i: usize, dx: f64| {
                    ys[i] * dx
                        + bc[i] / 2.0 * dx * dx
                        + cc[i] / 3.0 * dx * dx * dx
                        + dc[i] / 4.0 * dx * dx * dx * dx
                };
                let i0 = find_interval(xs, a);
                let i1 = find_interval(xs, b);
                if i0 == i1 {
                    return prim(i0, b - xs[i0]) - prim(i0, a - xs[i0]);
                }
                let mut total = prim(i0, xs[i0 + 1] - xs[i0]) - prim(i0, a - xs[i0]);
                for i in i0 + 1..i1 {
                    total += prim(i, xs[i + 1] - xs[i]);
                }
                total + prim(i1, b - xs[i1])
            }
            FittedModel::Polynomial { power, .. } => {
                let prim = poly_antiderivative(power);
                poly_eval(&prim, b) - poly_eval(&prim, a)
            }
        }
    }
}

/// Index `i` with `xs[i] <= xq < xs[i+1]`, clamped to the last segment for
/// `xq == xs[n-1]`.
pub(crate) fn find_interval(xs: &[f64], xq: f64) -> usize {
    let n = xs.len();
    let mut lo = 0;
    let mut hi = n - 1;
    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if xs[mid] <= xq {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Spacings `h[i] = x[i+1] - x[i]`.
pub(crate) fn spacings(xs: &[f64]) -> Vec<f64> {
    xs.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Horner evaluation of the Newton form
/// `P(x) = c[0] + c[1](x - x0) + ... + c[n-1](x - x0)...(x - x_{n-2})`.
fn newton_eval(coeffs: &[f64], xs: &[f64], xq: f64) -> f64 {
    let n = coeffs.len();
    let mut p = coeffs[n - 1];
    for j in (0..n - 1).rev() {
        p = coeffs[j] + (xq - xs[j]) * p;
    }
    p
}

/// Horner evaluation of monomial coefficients (ascending powers).
fn poly_eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

fn poly_differentiate(coeffs: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, &c)| k as f64 * c)
        .collect()
}

fn poly_antiderivative(coeffs: &[f64]) -> Vec<f64> {
    let mut prim = Vec::with_capacity(coeffs.len() + 1);
    prim.push(0.0);
    prim.extend(
        coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| c / (k as f64 + 1.0)),
    );
    prim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_interval_brackets_and_clamps() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(find_interval(&xs, 0.0), 0);
        assert_eq!(find_interval(&xs, 0.5), 0);
        assert_eq!(find_interval(&xs, 1.0), 1);
        assert_eq!(find_interval(&xs, 2.9), 2);
        assert_eq!(find_interval(&xs, 3.0), 2);
    }

    #[test]
    fn poly_calculus_round_trip() {
        // p(x) = 1 + 2x + 3x²
        let p = vec![1.0, 2.0, 3.0];
        assert_eq!(poly_eval(&p, 2.0), 17.0);
        assert_eq!(poly_differentiate(&p), vec![2.0, 6.0]);

        let prim = poly_antiderivative(&p);
        // ∫₀² p = 2 + 4 + 8 = 14
        assert!((poly_eval(&prim, 2.0) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn segment_integral_spans_multiple_segments() {
        // piecewise linear y = x on [0, 2] with a knot at 1
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 2.0];
        let model = FittedModel::Segments {
            b: vec![1.0, 1.0],
            c: vec![0.0, 0.0],
            d: vec![0.0, 0.0],
        };
        assert!((model.integrate(&xs, &ys, 0.0, 2.0) - 2.0).abs() < 1e-12);
        assert!((model.integrate(&xs, &ys, 0.5, 1.5) - 1.0).abs() < 1e-12);
    }
}
