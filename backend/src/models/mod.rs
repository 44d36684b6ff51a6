//! Domain models for the construction estimator

pub mod breakdown;
pub mod form;
pub mod project;
pub mod quote;

// Re-exports
pub use breakdown::{BreakdownError, CostBreakdown, CostCategory};
pub use form::ProjectForm;
pub use project::{BuildingType, FinishLevel, LocationClass, ParseCategoryError, ProjectInput};
pub use quote::{Quote, QuoteError, QUOTE_ID_PREFIX};
