/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → StartupTable  (memoized per path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ StartupTable │  Vec<StartupRecord>, sorted year/region/program sets
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year + region + program → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  KPIs over the subset, yearly trend over the table
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
