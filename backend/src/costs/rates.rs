//! Cost Rates and Multipliers
//!
//! Defines the base unit rates and the category multipliers used by the
//! estimator. All rates are currency per unit of area.
//!
//! Configuration is immutable once an estimator is built from it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{BuildingType, FinishLevel, LocationClass, ProjectInput};

/// Multiplier applied when a category is missing or unrecognized
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Default labor share of the material subtotal (35%)
pub const DEFAULT_LABOR_RATIO: f64 = 0.35;

/// Default contingency share of the material subtotal (10%)
pub const DEFAULT_CONTINGENCY_RATIO: f64 = 0.10;

/// Errors raised while loading or validating an estimator config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },
}

/// Base unit rates for the three material categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateTable {
    /// Structural rate per unit area
    pub structural: f64,
    /// Architectural rate per unit area
    pub architectural: f64,
    /// Mechanical, electrical and plumbing rate per unit area
    pub mep: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            structural: 12_000.0,
            architectural: 8_000.0,
            mep: 4_000.0,
        }
    }
}

/// Finish level multipliers
///
/// Applied to architectural and MEP costs only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinishMultipliers {
    /// Rough/basic finish. Default: 0.8
    pub basic: f64,
    /// Standard finish. Default: 1.0
    pub standard: f64,
    /// Luxury finish. Default: 1.5
    pub premium: f64,
}

impl Default for FinishMultipliers {
    fn default() -> Self {
        Self {
            basic: 0.8,
            standard: 1.0,
            premium: 1.5,
        }
    }
}

impl FinishMultipliers {
    /// Get the multiplier for a finish level
    ///
    /// # Returns
    /// The configured multiplier, or `NEUTRAL_MULTIPLIER` when absent
    pub fn get_multiplier(&self, finish: Option<FinishLevel>) -> f64 {
        match finish {
            Some(FinishLevel::Basic) => self.basic,
            Some(FinishLevel::Standard) => self.standard,
            Some(FinishLevel::Premium) => self.premium,
            None => NEUTRAL_MULTIPLIER,
        }
    }
}

/// Location adjustments (logistics cost)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationAdjustments {
    /// Default: 1.0
    pub metro: f64,
    /// Default: 1.15
    pub provincial: f64,
    /// Default: 1.3
    pub remote: f64,
}

impl Default for LocationAdjustments {
    fn default() -> Self {
        Self {
            metro: 1.0,
            provincial: 1.15,
            remote: 1.3,
        }
    }
}

impl LocationAdjustments {
    pub fn get_multiplier(&self, location: Option<LocationClass>) -> f64 {
        match location {
            Some(LocationClass::Metro) => self.metro,
            Some(LocationClass::Provincial) => self.provincial,
            Some(LocationClass::Remote) => self.remote,
            None => NEUTRAL_MULTIPLIER,
        }
    }
}

/// Building type multipliers (compliance and structural load)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypeMultipliers {
    /// Default: 1.0
    pub residential: f64,
    /// Default: 1.25
    pub commercial: f64,
}

impl Default for TypeMultipliers {
    fn default() -> Self {
        Self {
            residential: 1.0,
            commercial: 1.25,
        }
    }
}

impl TypeMultipliers {
    pub fn get_multiplier(&self, building_type: Option<BuildingType>) -> f64 {
        match building_type {
            Some(BuildingType::Residential) => self.residential,
            Some(BuildingType::Commercial) => self.commercial,
            None => NEUTRAL_MULTIPLIER,
        }
    }
}

/// Multipliers resolved for one project input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMultipliers {
    pub finish: f64,
    pub location: f64,
    pub building_type: f64,
}

impl ResolvedMultipliers {
    /// finish × location × type, applied to architectural and MEP costs
    pub fn composite(&self) -> f64 {
        self.finish * self.location * self.building_type
    }

    /// location × type, applied to structural cost (finish excluded)
    pub fn structural(&self) -> f64 {
        self.location * self.building_type
    }
}

/// Estimator Configuration
///
/// Bundles the base rates, the three category multiplier tables and the
/// labor/contingency ratios. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub base_rates: RateTable,

    #[serde(default)]
    pub finish_multipliers: FinishMultipliers,

    #[serde(default)]
    pub location_adjustments: LocationAdjustments,

    #[serde(default)]
    pub type_multipliers: TypeMultipliers,

    /// Labor as a share of the material subtotal
    #[serde(default = "default_labor_ratio")]
    pub labor_ratio: f64,

    /// Contingency as a share of the material subtotal
    #[serde(default = "default_contingency_ratio")]
    pub contingency_ratio: f64,
}

fn default_labor_ratio() -> f64 {
    DEFAULT_LABOR_RATIO
}

fn default_contingency_ratio() -> f64 {
    DEFAULT_CONTINGENCY_RATIO
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_rates: RateTable::default(),
            finish_multipliers: FinishMultipliers::default(),
            location_adjustments: LocationAdjustments::default(),
            type_multipliers: TypeMultipliers::default(),
            labor_ratio: DEFAULT_LABOR_RATIO,
            contingency_ratio: DEFAULT_CONTINGENCY_RATIO,
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rates and multipliers in a fixed order, used by validation and hashing
    fn positive_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("base_rates.structural", self.base_rates.structural),
            ("base_rates.architectural", self.base_rates.architectural),
            ("base_rates.mep", self.base_rates.mep),
            ("finish_multipliers.basic", self.finish_multipliers.basic),
            ("finish_multipliers.standard", self.finish_multipliers.standard),
            ("finish_multipliers.premium", self.finish_multipliers.premium),
            ("location_adjustments.metro", self.location_adjustments.metro),
            ("location_adjustments.provincial", self.location_adjustments.provincial),
            ("location_adjustments.remote", self.location_adjustments.remote),
            ("type_multipliers.residential", self.type_multipliers.residential),
            ("type_multipliers.commercial", self.type_multipliers.commercial),
        ]
    }

    fn ratio_fields(&self) -> [(&'static str, f64); 2] {
        [
            ("labor_ratio", self.labor_ratio),
            ("contingency_ratio", self.contingency_ratio),
        ]
    }

    /// Validate the config
    ///
    /// # Errors
    /// - `NonPositive` if a rate or multiplier is not finite and > 0
    /// - `Negative` if a ratio is not finite and >= 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.positive_fields() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in self.ratio_fields() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Resolve the category multipliers for a project
    pub fn resolve_multipliers(&self, input: &ProjectInput) -> ResolvedMultipliers {
        ResolvedMultipliers {
            finish: self.finish_multipliers.get_multiplier(input.finish),
            location: self.location_adjustments.get_multiplier(input.location),
            building_type: self.type_multipliers.get_multiplier(input.building_type),
        }
    }

    /// SHA256 fingerprint of every rate, multiplier and ratio
    ///
    /// Two configs hash equal iff all their values are numerically equal.
    pub fn config_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for (field, value) in self.positive_fields().into_iter().chain(self.ratio_fields()) {
            hasher.update(field.as_bytes());
            // -0.0 + 0.0 is +0.0, so signed zeros share one encoding
            hasher.update((value + 0.0).to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}
