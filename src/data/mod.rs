/// Data layer: core table types, loading, and persistence.
///
/// Architecture:
/// ```text
///  .csv / .json inputs
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Dataset / FeatureSpec
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  ordered named columns, row-aligned
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer   │  Dataset → .parquet / .csv
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod writer;
