//! Cost Schema Documentation
//!
//! Self-documenting schema for the cost categories of an estimate.
//! Generated from the active config so the documented defaults always
//! match the rates actually applied.

use serde::{Deserialize, Serialize};

use super::rates::EstimatorConfig;
use crate::models::CostCategory;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Documentation for a single cost category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostElement {
    /// Machine name (e.g., "structural")
    pub name: String,

    /// Human-readable display name (e.g., "Structural")
    pub display_name: String,

    pub category: CostCategory,

    /// What this cost represents
    pub description: String,

    /// Mathematical formula (plain text)
    pub formula: String,

    /// Configured rate or ratio
    pub default_value: String,

    /// Unit of the configured value
    pub unit: String,
}

/// Complete cost schema documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSchemaDoc {
    pub version: String,
    pub config_hash: String,
    pub cost_types: Vec<CostElement>,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl EstimatorConfig {
    /// Describe every cost category under this config
    pub fn schema_docs(&self) -> Vec<CostElement> {
        CostCategory::ALL
            .into_iter()
            .map(|category| self.describe(category))
            .collect()
    }

    fn describe(&self, category: CostCategory) -> CostElement {
        let (name, description, formula, value, unit) = match category {
            CostCategory::Structural => (
                "structural",
                "Frame, foundations and slabs. Driven by compliance and logistics, \
                    so the finish level does not scale it.",
                "structural_rate * total_area * location_mult * type_mult",
                self.base_rates.structural,
                "currency per unit area",
            ),
            CostCategory::Architectural => (
                "architectural",
                "Walls, openings, ceilings and surface finishes.",
                "architectural_rate * total_area * finish_mult * location_mult * type_mult",
                self.base_rates.architectural,
                "currency per unit area",
            ),
            CostCategory::Mep => (
                "mep",
                "Mechanical, electrical and plumbing systems.",
                "mep_rate * total_area * finish_mult * location_mult * type_mult",
                self.base_rates.mep,
                "currency per unit area",
            ),
            CostCategory::Labor => (
                "labor",
                "Labor estimate as a fixed share of the material subtotal.",
                "(structural + architectural + mep) * labor_ratio",
                self.labor_ratio,
                "ratio of subtotal",
            ),
            CostCategory::Contingency => (
                "contingency",
                "Buffer absorbing estimation uncertainty.",
                "(structural + architectural + mep) * contingency_ratio",
                self.contingency_ratio,
                "ratio of subtotal",
            ),
        };

        CostElement {
            name: name.to_string(),
            display_name: category.display_name().to_string(),
            category,
            description: description.to_string(),
            formula: formula.to_string(),
            default_value: value.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Get the cost schema for a config as pretty-printed JSON
pub fn get_cost_schema(config: &EstimatorConfig) -> Result<String, serde_json::Error> {
    let schema = CostSchemaDoc {
        version: "1.0".to_string(),
        config_hash: config.config_hash(),
        cost_types: config.schema_docs(),
    };

    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_category_serializes_to_json() {
        let json = serde_json::to_string(&CostCategory::Mep).unwrap();
        assert_eq!(json, "\"Mep\"");
    }

    #[test]
    fn test_schema_covers_every_category() {
        let docs = EstimatorConfig::default().schema_docs();
        let categories: Vec<_> = docs.iter().map(|d| d.category).collect();
        assert_eq!(categories, CostCategory::ALL.to_vec());
    }

    #[test]
    fn test_structural_formula_has_no_finish_term() {
        let docs = EstimatorConfig::default().schema_docs();
        let structural = &docs[0];
        assert_eq!(structural.name, "structural");
        assert!(!structural.formula.contains("finish"));
        assert!(docs[1].formula.contains("finish_mult"));
    }

    #[test]
    fn test_schema_reflects_config_values() {
        let config = EstimatorConfig {
            labor_ratio: 0.4,
            ..EstimatorConfig::default()
        };
        let docs = config.schema_docs();
        let labor = docs.iter().find(|d| d.category == CostCategory::Labor).unwrap();
        assert_eq!(labor.default_value, "0.4");
        assert_eq!(docs[0].default_value, "12000");
    }

    #[test]
    fn test_get_cost_schema_json() {
        let config = EstimatorConfig::default();
        let json = get_cost_schema(&config).unwrap();
        let parsed: CostSchemaDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.config_hash, config.config_hash());
        assert_eq!(parsed.cost_types.len(), 5);
    }
}
