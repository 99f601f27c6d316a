/// Data layer: core types and file loading.
///
/// Architecture:
/// ```text
///  .txt / .csv / .xls / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  detect encoding, sniff delimiter, parse file
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ Measurements  │  two parallel series: energy, duration
///   └──────────────┘
/// ```

pub mod loader;
pub mod model;
