//! Estimation engine
//!
//! Turns a [`ProjectInput`] into a [`CostBreakdown`]:
//!
//! ```text
//! total_area    = area * floor_count
//! structural    = structural_rate    * total_area * location * type
//! architectural = architectural_rate * total_area * finish * location * type
//! mep           = mep_rate           * total_area * finish * location * type
//! subtotal      = structural + architectural + mep
//! labor         = subtotal * labor_ratio
//! contingency   = subtotal * contingency_ratio
//! total         = subtotal + labor + contingency
//! ```
//!
//! Finish quality affects surfaces and systems, not the frame, so the
//! finish multiplier never touches structural cost.
//!
//! The engine is stateless: an `Estimator` only holds its immutable config
//! and can be shared across threads by reference.

use thiserror::Error;
use tracing::debug;

use crate::costs::{ConfigError, EstimatorConfig};
use crate::models::{CostBreakdown, ProjectInput, Quote};

/// Errors that can occur during estimation
///
/// Unknown categories are not errors; they resolve to the neutral
/// multiplier.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EstimateError {
    #[error("Area must be a positive number, got '{0}'")]
    InvalidArea(String),

    #[error("Floor count must be a positive whole number, got '{0}'")]
    InvalidFloorCount(String),

    #[error("Estimate for total area {total_area} is outside the representable range")]
    EstimateOverflow { total_area: f64 },
}

/// Cost estimator bound to one rate configuration
///
/// # Example
/// ```
/// use esquared_estimator_core::{Estimator, FinishLevel, ProjectInput};
///
/// let estimator = Estimator::default();
/// let input = ProjectInput::new(100.0, 1).with_finish(FinishLevel::Premium);
/// let breakdown = estimator.estimate(&input).unwrap();
/// assert_eq!(breakdown.structural_cost(), 1_200_000.0);
/// assert!((breakdown.total_estimate() - 4_350_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    config_hash: String,
}

impl Estimator {
    /// Build an estimator from a config
    ///
    /// # Errors
    /// Returns `ConfigError` if any rate, multiplier or ratio is out of range
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config_hash = config.config_hash();
        debug!(config_hash = %config_hash, "estimator configured");
        Ok(Self {
            config,
            config_hash,
        })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// SHA256 fingerprint of the config
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Estimate the cost of a project
    ///
    /// # Errors
    /// - `InvalidArea` if area is not a finite number greater than zero
    /// - `InvalidFloorCount` if floor count is zero
    /// - `EstimateOverflow` if any cost is not a finite number
    pub fn estimate(&self, input: &ProjectInput) -> Result<CostBreakdown, EstimateError> {
        input.validate()?;
        compute_breakdown(&self.config, input)
    }

    /// Estimate a project and wrap the result in a new quote
    pub fn quote(&self, input: ProjectInput) -> Result<Quote, EstimateError> {
        let breakdown = self.estimate(&input)?;
        let quote = Quote::new(input, breakdown, self.config_hash.clone());
        debug!(quote_id = quote.id(), total = quote.total_estimate(), "quote created");
        Ok(quote)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        let config = EstimatorConfig::default();
        let config_hash = config.config_hash();
        Self {
            config,
            config_hash,
        }
    }
}

/// Estimate a project with the default rate configuration
pub fn estimate(input: &ProjectInput) -> Result<CostBreakdown, EstimateError> {
    input.validate()?;
    compute_breakdown(&EstimatorConfig::default(), input)
}

/// Core arithmetic. Assumes the input has been validated.
fn compute_breakdown(
    config: &EstimatorConfig,
    input: &ProjectInput,
) -> Result<CostBreakdown, EstimateError> {
    let mults = config.resolve_multipliers(input);
    let rates = &config.base_rates;

    let total_area = input.total_area();
    let composite = mults.composite();

    let structural = rates.structural * total_area * mults.structural();
    let architectural = rates.architectural * total_area * composite;
    let mep = rates.mep * total_area * composite;

    let subtotal = structural + architectural + mep;
    let labor = subtotal * config.labor_ratio;
    let contingency = subtotal * config.contingency_ratio;

    let breakdown = CostBreakdown::new(total_area, structural, architectural, mep, labor, contingency);
    // Any overflowing category propagates into the total
    if !(total_area.is_finite() && breakdown.total_estimate().is_finite()) {
        return Err(EstimateError::EstimateOverflow { total_area });
    }
    debug!(
        total_area,
        finish = ?input.finish,
        location = ?input.location,
        building_type = ?input.building_type,
        composite,
        total = breakdown.total_estimate(),
        "estimate computed"
    );
    Ok(breakdown)
}
