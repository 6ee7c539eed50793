/// Data layer: typed records, loading, sampling, filtering and the views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → TradeTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  sample   │  seeded draw of k distinct rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Import/Export × Category inclusion sets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  views    │  seven pure reductions → DashboardViews
///   └──────────┘
/// ```
/// `pipeline` chains the last three as one function of its inputs.

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod sample;
pub mod views;
