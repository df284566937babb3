/// Data layer: directory scanning, schema inference, loading and sampling.
///
/// Architecture:
/// ```text
///   data_dir/*.parquet
///        │
///        ▼
///   ┌──────────┐
///   │  scan     │  list + pick dataset → DataFile
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  column name → DecodingRule
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode batches under the rules → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  sequential / random / clamped indices
///   └──────────┘
/// ```

pub mod demo;
pub mod loader;
pub mod model;
pub mod scan;
pub mod schema;
pub mod select;
