//! 3D hodograph viewer for acoustic-emission measurement data.
//!
//! The crate reads tabular measurements (energy in joules, signal duration
//! in milliseconds) from delimited text or Excel files and renders vectors
//! from the origin to each data point, together with a smoothed cubic-spline
//! curve through the vector tips — the "hodograph".
//!
//! Data flows one way:
//!
//! ```text
//!   loader → Measurements → interpolate_curve_3d → VectorPlotter
//! ```
//!
//! Everything is transient and recomputed per invocation; nothing persists
//! between calls.

pub mod data;
pub mod math;
pub mod plot;
