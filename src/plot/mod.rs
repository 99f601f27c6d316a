//! 3D vector and hodograph plots.
//!
//! Declarative configuration of the charting backend; no plotting state
//! survives a call. Figure construction is separated from [`Plot::show`] so
//! the built figure can be inspected without opening a browser.

pub mod glyph;

use log::info;
use plotly::color::NamedColor;
use plotly::common::{Anchor, HoverInfo, Line, Marker, Mode, Position, Title};
use plotly::layout::{AspectMode, Axis, Camera, Eye, Layout, LayoutScene, Legend, Margin};
use plotly::{Plot, Scatter3D};

use crate::math::{self, DEFAULT_CURVE_POINTS};

/// Cone length as a fraction of the longest vector.
const GLYPH_RATIO: f64 = 0.05;

// ---------------------------------------------------------------------------
// VectorPlotter
// ---------------------------------------------------------------------------

/// Renders origin-to-point vectors in a fixed 3D scene.
///
/// Axes: X is energy, Y is signal duration, Z is the derived quantity the
/// hodograph tracks (deposit thickness by default).
#[derive(Debug, Clone)]
pub struct VectorPlotter {
    x_label: String,
    y_label: String,
    z_label: String,
}

impl Default for VectorPlotter {
    fn default() -> Self {
        Self::new("Энергия, Дж", "Длительность, мс", "Толщина отложений, мм")
    }
}

impl VectorPlotter {
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        z_label: impl Into<String>,
    ) -> Self {
        Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            z_label: z_label.into(),
        }
    }

    /// Plain vector plot: point markers plus origin-to-point segments.
    /// Opens the figure in the browser.
    pub fn plot_3d(&self, x: &[f64], y: &[f64], z: &[f64], title: &str) {
        info!("rendering vector plot {title:?} with {} points", x.len().min(y.len()).min(z.len()));
        self.build_vector_figure(x, y, z, title).show();
    }

    /// Hodograph plot: vectors sorted by ascending Z, a smoothed curve
    /// through the tips, and a directional cone at each tip. Opens the
    /// figure in the browser.
    pub fn plot_hodograph_3d(&self, x: &[f64], y: &[f64], z: &[f64], title: &str) {
        info!("rendering hodograph {title:?} with {} points", x.len().min(y.len()).min(z.len()));
        self.build_hodograph_figure(x, y, z, title).show();
    }

    /// Build the plain vector figure without displaying it.
    pub fn build_vector_figure(&self, x: &[f64], y: &[f64], z: &[f64], title: &str) -> Plot {
        let mut plot = Plot::new();

        plot.add_trace(
            Scatter3D::new(x.to_vec(), y.to_vec(), z.to_vec())
                .mode(Mode::MarkersText)
                .marker(Marker::new().size(8).color(NamedColor::Red).opacity(0.8))
                .text_array(tip_labels(z))
                .text_position(Position::TopCenter)
                .name("Точки годографа"),
        );

        for (i, ((&xi, &yi), &zi)) in x.iter().zip(y).zip(z).enumerate() {
            plot.add_trace(vector_segment(xi, yi, zi, &format!("Вектор {}", i + 1)));
            plot.add_trace(
                Scatter3D::new(vec![xi], vec![yi], vec![zi])
                    .mode(Mode::Markers)
                    .marker(Marker::new().size(6).color(NamedColor::Blue))
                    .name(format!("Конец вектора {}", i + 1))
                    .hover_info(HoverInfo::Skip),
            );
        }

        plot.set_layout(self.layout(title, x, y, z));
        plot
    }

    /// Build the hodograph figure without displaying it.
    pub fn build_hodograph_figure(&self, x: &[f64], y: &[f64], z: &[f64], title: &str) -> Plot {
        // Traverse the tips in order of growing thickness so the curve is
        // parameterised along the quantity being tracked.
        let (xs, ys, zs) = sorted_by_z(x, y, z);

        let mut plot = Plot::new();

        plot.add_trace(
            Scatter3D::new(xs.clone(), ys.clone(), zs.clone())
                .mode(Mode::MarkersText)
                .marker(Marker::new().size(3).color(NamedColor::Red).opacity(0.8))
                .text_array(tip_labels(&zs))
                .text_position(Position::TopCenter)
                .name("Точки годографа"),
        );

        let (curve_x, curve_y, curve_z) =
            math::interpolate_curve_3d(&xs, &ys, &zs, DEFAULT_CURVE_POINTS);
        plot.add_trace(
            Scatter3D::new(curve_x, curve_y, curve_z)
                .mode(Mode::Lines)
                .line(Line::new().color(NamedColor::Green).width(4.0))
                .name("Годограф (гладкая кривая)")
                .hover_info(HoverInfo::Skip),
        );

        let glyph_length = GLYPH_RATIO * longest_vector(&xs, &ys, &zs);
        for (i, ((&xi, &yi), &zi)) in xs.iter().zip(&ys).zip(&zs).enumerate() {
            plot.add_trace(vector_segment(xi, yi, zi, &format!("Вектор {}", i + 1)));
            plot.add_trace(glyph::cone_trace([xi, yi, zi], [xi, yi, zi], glyph_length));
        }

        plot.set_layout(self.layout(title, x, y, z));
        plot
    }

    fn layout(&self, title: &str, x: &[f64], y: &[f64], z: &[f64]) -> Layout {
        Layout::new()
            .title(Title::with_text(title))
            .margin(Margin::new().left(0).right(0).bottom(0).top(40))
            .legend(
                Legend::new()
                    .x(0.01)
                    .x_anchor(Anchor::Left)
                    .y(0.99)
                    .y_anchor(Anchor::Top),
            )
            .scene(
                LayoutScene::new()
                    .x_axis(
                        Axis::new()
                            .title(Title::with_text(self.x_label.clone()))
                            .range(axis_range(x)),
                    )
                    .y_axis(
                        Axis::new()
                            .title(Title::with_text(self.y_label.clone()))
                            .range(axis_range(y)),
                    )
                    .z_axis(
                        Axis::new()
                            .title(Title::with_text(self.z_label.clone()))
                            .range(axis_range(z)),
                    )
                    .camera(Camera::new().eye(Eye::new().x(1.5).y(1.5).z(1.5)))
                    .aspect_mode(AspectMode::Cube),
            )
    }
}

// ---------------------------------------------------------------------------
// Trace helpers
// ---------------------------------------------------------------------------

fn vector_segment(x: f64, y: f64, z: f64, name: &str) -> Box<Scatter3D<f64, f64, f64>> {
    Scatter3D::new(vec![0.0, x], vec![0.0, y], vec![0.0, z])
        .mode(Mode::Lines)
        .line(Line::new().color(NamedColor::Blue).width(3.0))
        .name(name)
        .hover_info(HoverInfo::Skip)
}

fn tip_labels(z: &[f64]) -> Vec<String> {
    z.iter().map(|zi| format!("Z={zi:.1}")).collect()
}

/// Axis range `[0, 1.1 × max]`; degenerate series fall back to `[0, 1]`.
fn axis_range(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() && max > 0.0 {
        vec![0.0, 1.1 * max]
    } else {
        vec![0.0, 1.0]
    }
}

/// Sort the point triples by ascending Z. Zipping truncates to the shortest
/// series, so desynchronised inputs lose their tail instead of panicking.
fn sorted_by_z(x: &[f64], y: &[f64], z: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut triples: Vec<(f64, f64, f64)> = x
        .iter()
        .zip(y)
        .zip(z)
        .map(|((&xi, &yi), &zi)| (xi, yi, zi))
        .collect();
    triples.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut xs = Vec::with_capacity(triples.len());
    let mut ys = Vec::with_capacity(triples.len());
    let mut zs = Vec::with_capacity(triples.len());
    for (xi, yi, zi) in triples {
        xs.push(xi);
        ys.push(yi);
        zs.push(zi);
    }
    (xs, ys, zs)
}

fn longest_vector(x: &[f64], y: &[f64], z: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&xi, &yi), &zi)| (xi * xi + yi * yi + zi * zi).sqrt())
        .fold(0.0, f64::max)
}
