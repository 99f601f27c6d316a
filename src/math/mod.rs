//! Curve interpolation.

pub mod spline;

pub use spline::CubicSpline;

/// Output resolution of the smoothed curve.
pub const DEFAULT_CURVE_POINTS: usize = 300;

/// Smooth a 3D polyline through the given points.
///
/// Each input point gets a uniform parameter value over `[0, 1]` in input
/// order; an independent cubic spline is fitted per axis against that shared
/// parameter and evaluated at `num_points` uniformly spaced parameters. The
/// spline passes through every input point, so the first and last output
/// points equal the first and last input points.
///
/// Fewer than 4 input points are returned unchanged (a cubic fit needs at
/// least 4). Input order is the traversal order: the caller sorts the points
/// into a meaningful sequence first, nothing is reordered here.
pub fn interpolate_curve_3d(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    num_points: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    assert_eq!(x.len(), y.len(), "coordinate series must have equal length");
    assert_eq!(x.len(), z.len(), "coordinate series must have equal length");

    if x.len() < 4 || num_points < 2 {
        return (x.to_vec(), y.to_vec(), z.to_vec());
    }

    let t = linspace(x.len());
    let spline_x = CubicSpline::fit(&t, x);
    let spline_y = CubicSpline::fit(&t, y);
    let spline_z = CubicSpline::fit(&t, z);

    let t_new = linspace(num_points);
    let xs = t_new.iter().map(|&t| spline_x.eval(t)).collect();
    let ys = t_new.iter().map(|&t| spline_y.eval(t)).collect();
    let zs = t_new.iter().map(|&t| spline_z.eval(t)).collect();
    (xs, ys, zs)
}

/// `n` uniformly spaced values over `[0, 1]`, endpoints included.
fn linspace(n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}
