/// Data layer: core types, loading, cleaning, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (headers trimmed, day-first dates)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce   │  force metric columns to number-or-missing
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  interactions per 1000 followers
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  platform membership + inclusive date range → indices
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐     ┌──────────┐
///   │ aggregate  │     │  stats    │  monthly post totals / KPI means,
///   └───────────┘     └──────────┘  per-platform chart series
/// ```
///
/// After `coerce` and `derive` the dataset is read-only; `filter`,
/// `aggregate`, and `stats` are pure functions over it.

pub mod aggregate;
pub mod coerce;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
