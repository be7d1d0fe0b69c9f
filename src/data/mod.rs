/// Data layer: core types, loading, axis derivation, and filtering.
///
/// Architecture:
/// ```text
///  markers .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset (typed records)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   axis    │  distinct sorted year-month keys + labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  resolve bounds, evaluate predicate per record
///   └──────────┘
/// ```

pub mod axis;
pub mod filter;
pub mod loader;
pub mod model;
