/// Data layer: core types, loading, and the statistics behind each figure.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Column>, one CellValue per row
///   └──────────┘
///        │
///        ├── describe     count / mean / std / quartiles
///        ├── histogram    10-bin frequencies per numeric column
///        ├── encoding     Class labels → first-seen integer codes
///        ├── correlation  pairwise Pearson matrix
///        └── missing      null percentage per column
/// ```

pub mod correlation;
pub mod describe;
pub mod encoding;
pub mod histogram;
pub mod loader;
pub mod missing;
pub mod model;
