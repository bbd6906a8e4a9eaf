/// Data layer: core types, parsing, and selection.
///
/// Architecture:
/// ```text
///      .agr text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  line scan → facts by series index → Document
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Document  │  Vec<Series>, title, axis labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  restrict → relabel → scale → Vec<Series>
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
