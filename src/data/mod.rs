/// Data layer: result-directory schema, parsing, and derived statistics.
///
/// Architecture:
/// ```text
///   result_dir/{input,output}/…
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  Artifact → relative path, PlotKind → required set
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  text / csv / labels → model types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ quantile  │  bootstrap ensemble → 16th/84th percentile band
///   └──────────┘
/// ```

pub mod error;
pub mod labels;
pub mod loader;
pub mod model;
pub mod quantile;
pub mod schema;
pub mod text;
