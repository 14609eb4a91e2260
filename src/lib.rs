//! Retail markdown optimization assistant.
//!
//! The data/analytics layer behind the markdown dashboard: load the product
//! dataset once, then answer per-product queries on demand. The presentation
//! layer consumes:
//!
//! * [`data::loader::load_file`] → a validated [`data::model::ProductDataset`]
//! * [`metrics`] — per-stage revenue / sell-through and dashboard aggregates
//! * [`recommend::DiscountModel`] — `recommend(product) → discount`
//! * [`simulate::simulate`] — `simulate(product, markdown) → (sales, revenue)`

pub mod data;
pub mod error;
pub mod metrics;
pub mod recommend;
pub mod simulate;

pub use data::model::{ProductDataset, ProductRecord, Stage};
pub use error::{AdvisorError, Result};
pub use recommend::DiscountModel;
pub use simulate::{baseline, simulate, SimulatedPoint};
