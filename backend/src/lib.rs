//! Esquared Estimator Core - Rust Engine
//!
//! Construction cost estimation from floor area, floor count, building
//! type, finish level and location.
//!
//! # Architecture
//!
//! - **costs**: Base rates, category multipliers, schema documentation
//! - **models**: Domain types (ProjectInput, ProjectForm, CostBreakdown, Quote)
//! - **estimator**: The estimation engine
//! - **format**: Currency formatting for display
//!
//! # Critical Invariants
//!
//! 1. Estimation is pure: same input + config gives the same breakdown
//! 2. total_estimate is the sum of the five category costs
//! 3. Finish level never scales structural cost
//! 4. Unknown categories resolve to the neutral multiplier (1.0), never an error

// Module declarations
pub mod costs;
pub mod estimator;
pub mod format;
pub mod models;

// Re-exports for convenience
pub use costs::{get_cost_schema, ConfigError, EstimatorConfig, RateTable, NEUTRAL_MULTIPLIER};
pub use estimator::{estimate, EstimateError, Estimator};
pub use format::{format_currency, CurrencyFormat};
pub use models::{
    BreakdownError, BuildingType, CostBreakdown, CostCategory, FinishLevel, LocationClass,
    ParseCategoryError, ProjectForm, ProjectInput, Quote, QuoteError, QUOTE_ID_PREFIX,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

/// Format an amount as Philippine pesos.
#[cfg(feature = "pyo3")]
#[pyfunction]
#[pyo3(name = "format_currency")]
fn py_format_currency(amount: f64) -> String {
    format_currency(amount)
}

/// Get the cost schema documentation as a JSON string.
///
/// Uses the default config unless `config_json` is given.
#[cfg(feature = "pyo3")]
#[pyfunction]
#[pyo3(name = "get_cost_schema", signature = (config_json=None))]
fn py_get_cost_schema(config_json: Option<&str>) -> PyResult<String> {
    let config = match config_json {
        Some(json) => EstimatorConfig::from_json(json).map_err(ffi::types::to_py_err)?,
        None => EstimatorConfig::default(),
    };
    get_cost_schema(&config).map_err(ffi::types::to_py_err)
}

#[cfg(feature = "pyo3")]
#[pymodule]
fn esquared_estimator_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::estimator::PyEstimator>()?;
    m.add_function(wrap_pyfunction!(py_format_currency, m)?)?;
    m.add_function(wrap_pyfunction!(py_get_cost_schema, m)?)?;
    Ok(())
}
