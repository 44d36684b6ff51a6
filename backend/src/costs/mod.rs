//! Cost Rates and Schema Documentation
//!
//! This module provides:
//! - Rate and multiplier configuration (`EstimatorConfig`)
//! - Self-documenting schema for cost categories (`schema_docs`)

pub mod rates;
pub mod schema_docs;

// Re-exports
pub use rates::{
    ConfigError, EstimatorConfig, FinishMultipliers, LocationAdjustments, RateTable,
    ResolvedMultipliers, TypeMultipliers, DEFAULT_CONTINGENCY_RATIO, DEFAULT_LABOR_RATIO,
    NEUTRAL_MULTIPLIER,
};
pub use schema_docs::{get_cost_schema, CostElement, CostSchemaDoc};
