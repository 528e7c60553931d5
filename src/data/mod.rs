/// Data layer: core types, loading, and curve extraction.
///
/// Architecture:
/// ```text
///   CSV Data File.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → MeasurementTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ MeasurementTable  │  raw cells, header rows included
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  column pair → volts, mA, mA·cm⁻² or mW
///   └──────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
