//! Cone glyphs marking vector tips.
//!
//! The charting backend has no cone trace, so the directional arrow at each
//! vector tip is built as explicit mesh geometry: a ring of base vertices
//! perpendicular to the vector, fan-triangulated to the apex and to the base
//! centre.

use plotly::color::NamedColor;
use plotly::common::HoverInfo;
use plotly::Mesh3D;

/// Number of vertices in the base ring.
const SEGMENTS: usize = 16;
/// Base radius as a fraction of the cone length.
const RADIUS_RATIO: f64 = 0.4;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Vertex and triangle buffers of a single cone.
#[derive(Debug, Clone)]
pub struct ConeGeometry {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
}

/// Build the cone pointing along `direction` with its apex at `tip`.
///
/// Vertex 0 is the apex, vertex 1 the base centre, vertices 2.. the base
/// ring. Degenerate directions (zero length) produce a cone along +Z so the
/// glyph stays visible.
pub fn cone_geometry(tip: [f64; 3], direction: [f64; 3], length: f64) -> ConeGeometry {
    let axis = normalize(direction).unwrap_or([0.0, 0.0, 1.0]);
    let (u, v) = orthonormal_basis(axis);

    let base_centre = [
        tip[0] - axis[0] * length,
        tip[1] - axis[1] * length,
        tip[2] - axis[2] * length,
    ];
    let radius = length * RADIUS_RATIO;

    let mut x = vec![tip[0], base_centre[0]];
    let mut y = vec![tip[1], base_centre[1]];
    let mut z = vec![tip[2], base_centre[2]];

    for s in 0..SEGMENTS {
        let angle = std::f64::consts::TAU * s as f64 / SEGMENTS as f64;
        let (sin, cos) = angle.sin_cos();
        x.push(base_centre[0] + radius * (cos * u[0] + sin * v[0]));
        y.push(base_centre[1] + radius * (cos * u[1] + sin * v[1]));
        z.push(base_centre[2] + radius * (cos * u[2] + sin * v[2]));
    }

    let mut i = Vec::with_capacity(2 * SEGMENTS);
    let mut j = Vec::with_capacity(2 * SEGMENTS);
    let mut k = Vec::with_capacity(2 * SEGMENTS);
    for s in 0..SEGMENTS {
        let here = 2 + s;
        let next = 2 + (s + 1) % SEGMENTS;
        // Side face to the apex.
        i.push(0);
        j.push(here);
        k.push(next);
        // Base face to the centre, opposite winding.
        i.push(1);
        j.push(next);
        k.push(here);
    }

    ConeGeometry { x, y, z, i, j, k }
}

/// The cone as a ready-to-add mesh trace.
pub fn cone_trace(tip: [f64; 3], direction: [f64; 3], length: f64) -> Box<Mesh3D<f64, f64, f64>> {
    let geometry = cone_geometry(tip, direction, length);
    Mesh3D::new(
        geometry.x,
        geometry.y,
        geometry.z,
        Some(geometry.i),
        Some(geometry.j),
        Some(geometry.k),
    )
    .color(NamedColor::Blue)
    .show_legend(false)
    .hover_info(HoverInfo::Skip)
}

// ---------------------------------------------------------------------------
// Vector helpers
// ---------------------------------------------------------------------------

fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if norm > 0.0 && norm.is_finite() {
        Some([v[0] / norm, v[1] / norm, v[2] / norm])
    } else {
        None
    }
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Two unit vectors spanning the plane perpendicular to `axis`.
fn orthonormal_basis(axis: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    // Any helper vector not parallel to the axis will do.
    let helper = if axis[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let u = normalize(cross(axis, helper)).unwrap_or([0.0, 1.0, 0.0]);
    let v = cross(axis, u);
    (u, v)
}
