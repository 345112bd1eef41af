/// Data layer: core types, cleaning, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  read rows, trim headers ─┐
///   └──────────┘                           │
///        │                          ┌──────────┐
///        │                          │  clean   │  salary / rating parsing
///        ▼                          └──────────┘
///   ┌───────────┐
///   │ HrDataset │  Vec<EmployeeRecord>, column index
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  apply categorical selections → filtered indices
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
