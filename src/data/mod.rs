/// Data layer: core types, loading, derived fields, expansion and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate schema, impute/drop → Vec<Record>
///   └──────────┘      (derive: year_added, years_difference, duration_minutes)
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  immutable, optionally memoized by `cache`
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  expand   │  one row per country / genre token (on demand)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  type / release year / country / rating predicates
///   └──────────┘
/// ```

pub mod cache;
pub mod derive;
pub mod expand;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;
