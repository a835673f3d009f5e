/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  ML_school_testing_clean.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, derive BMI_Category → Table (cached once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected names ∧ category → view (Table)
///   └──────────┘
///        │
///        ├──────────────► metrics   count / mean / max
///        └──────────────► export    view → CSV bytes
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
