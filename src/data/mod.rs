/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → ProductDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ProductDataset │  Vec<ProductRecord>, unique-value indices
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category / season predicates → filtered indices
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
