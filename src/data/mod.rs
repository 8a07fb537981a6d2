/// Data layer: typed records, loading, filtering and aggregates.
///
/// Architecture:
/// ```text
///      movies.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Movie>, headers, genre index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ analysis  │  year trend, genre means, top 10, summary
///   └──────────┘
/// ```

pub mod analysis;
pub mod filter;
pub mod loader;
pub mod model;
