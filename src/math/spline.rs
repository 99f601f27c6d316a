// ---------------------------------------------------------------------------
// Natural cubic spline
// ---------------------------------------------------------------------------

/// A natural cubic spline through a set of knots.
///
/// Construction solves the tridiagonal system for the second derivatives at
/// each knot (natural boundary conditions: zero curvature at both ends);
/// evaluation interpolates the enclosing cubic segment. The curve passes
/// through every knot exactly.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Strictly increasing parameter values.
    knots: Vec<f64>,
    /// Values at the knots.
    values: Vec<f64>,
    /// Second derivatives at the knots.
    curvatures: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline.
    ///
    /// # Panics
    /// Panics if the slices differ in length, hold fewer than 2 points, or
    /// if `knots` is not strictly increasing.
    pub fn fit(knots: &[f64], values: &[f64]) -> Self {
        assert_eq!(knots.len(), values.len(), "knots and values must have equal length");
        assert!(knots.len() >= 2, "need at least 2 knots");
        for i in 1..knots.len() {
            assert!(knots[i] > knots[i - 1], "knots must be strictly increasing at index {i}");
        }

        let n = knots.len();
        let mut curvatures = vec![0.0; n];
        let mut scratch = vec![0.0; n - 1];

        // Forward sweep of the tridiagonal system.
        for i in 1..n - 1 {
            let sig = (knots[i] - knots[i - 1]) / (knots[i + 1] - knots[i - 1]);
            let p = sig * curvatures[i - 1] + 2.0;
            curvatures[i] = (sig - 1.0) / p;
            let rhs = (values[i + 1] - values[i]) / (knots[i + 1] - knots[i])
                - (values[i] - values[i - 1]) / (knots[i] - knots[i - 1]);
            scratch[i] = (6.0 * rhs / (knots[i + 1] - knots[i - 1]) - sig * scratch[i - 1]) / p;
        }

        // Back substitution.
        for i in (1..n - 1).rev() {
            curvatures[i] = curvatures[i] * curvatures[i + 1] + scratch[i];
        }

        Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            curvatures,
        }
    }

    /// Evaluate the spline at `t`.  Outside the knot range the boundary
    /// segment's polynomial is extended.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.knots.len();

        // Binary search for the enclosing segment.
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.knots[mid] > t {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.knots[hi] - self.knots[lo];
        let a = (self.knots[hi] - t) / h;
        let b = (t - self.knots[lo]) / h;

        a * self.values[lo]
            + b * self.values[hi]
            + ((a * a * a - a) * self.curvatures[lo] + (b * b * b - b) * self.curvatures[hi])
                * h
                * h
                / 6.0
    }
}
