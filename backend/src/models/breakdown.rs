//! Cost breakdown model
//!
//! Output of an estimate: the gross area, one cost per category and the
//! total. A breakdown is a plain value; it is never mutated after the
//! estimator creates it.
//!
//! CRITICAL: total_estimate is always the sum of the five category costs.
//! Deserialization re-checks this, so a stored breakdown cannot break it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative tolerance when checking a stored total against its categories
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Errors raised when a deserialized breakdown is inconsistent
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BreakdownError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("total_area must be greater than zero, got {0}")]
    NonPositiveArea(f64),

    #[error("{field} must not be negative, got {value}")]
    NegativeCost { field: &'static str, value: f64 },

    #[error("total_estimate {total} does not match the sum of categories {sum}")]
    TotalMismatch { total: f64, sum: f64 },
}

/// Cost category of a breakdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCategory {
    /// Frame and foundations, scaled by location and building type only
    Structural,
    /// Walls, openings and finishes
    Architectural,
    /// Mechanical, electrical and plumbing systems
    Mep,
    /// Labor, a fixed ratio of the material subtotal
    Labor,
    /// Buffer for estimation uncertainty, a fixed ratio of the subtotal
    Contingency,
}

impl CostCategory {
    pub const ALL: [CostCategory; 5] = [
        CostCategory::Structural,
        CostCategory::Architectural,
        CostCategory::Mep,
        CostCategory::Labor,
        CostCategory::Contingency,
    ];

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            CostCategory::Structural => "Structural",
            CostCategory::Architectural => "Architectural",
            CostCategory::Mep => "MEP",
            CostCategory::Labor => "Labor",
            CostCategory::Contingency => "Contingency",
        }
    }

    /// True for the three rate-driven categories that make up the subtotal
    pub fn is_material(&self) -> bool {
        matches!(
            self,
            CostCategory::Structural | CostCategory::Architectural | CostCategory::Mep
        )
    }
}

/// Categorized estimate for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCostBreakdown")]
pub struct CostBreakdown {
    /// Per-floor area × floor count
    total_area: f64,
    structural_cost: f64,
    architectural_cost: f64,
    mep_cost: f64,
    labor_cost: f64,
    contingency_cost: f64,
    total_estimate: f64,
}

/// Unchecked wire form of a breakdown
#[derive(Deserialize)]
struct RawCostBreakdown {
    total_area: f64,
    structural_cost: f64,
    architectural_cost: f64,
    mep_cost: f64,
    labor_cost: f64,
    contingency_cost: f64,
    total_estimate: f64,
}

impl TryFrom<RawCostBreakdown> for CostBreakdown {
    type Error = BreakdownError;

    fn try_from(raw: RawCostBreakdown) -> Result<Self, Self::Error> {
        let costs = [
            ("structural_cost", raw.structural_cost),
            ("architectural_cost", raw.architectural_cost),
            ("mep_cost", raw.mep_cost),
            ("labor_cost", raw.labor_cost),
            ("contingency_cost", raw.contingency_cost),
        ];
        let totals = [
            ("total_area", raw.total_area),
            ("total_estimate", raw.total_estimate),
        ];

        for (field, value) in costs.into_iter().chain(totals) {
            if !value.is_finite() {
                return Err(BreakdownError::NonFinite { field, value });
            }
        }
        if raw.total_area <= 0.0 {
            return Err(BreakdownError::NonPositiveArea(raw.total_area));
        }
        for (field, value) in costs {
            if value < 0.0 {
                return Err(BreakdownError::NegativeCost { field, value });
            }
        }

        let breakdown = CostBreakdown::new(
            raw.total_area,
            raw.structural_cost,
            raw.architectural_cost,
            raw.mep_cost,
            raw.labor_cost,
            raw.contingency_cost,
        );
        let sum = breakdown.total_estimate;
        if (sum - raw.total_estimate).abs() > TOTAL_TOLERANCE * sum.abs().max(1.0) {
            return Err(BreakdownError::TotalMismatch {
                total: raw.total_estimate,
                sum,
            });
        }
        Ok(breakdown)
    }
}

impl CostBreakdown {
    pub(crate) fn new(
        total_area: f64,
        structural_cost: f64,
        architectural_cost: f64,
        mep_cost: f64,
        labor_cost: f64,
        contingency_cost: f64,
    ) -> Self {
        let total_estimate =
            structural_cost + architectural_cost + mep_cost + labor_cost + contingency_cost;
        Self {
            total_area,
            structural_cost,
            architectural_cost,
            mep_cost,
            labor_cost,
            contingency_cost,
            total_estimate,
        }
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    pub fn structural_cost(&self) -> f64 {
        self.structural_cost
    }

    pub fn architectural_cost(&self) -> f64 {
        self.architectural_cost
    }

    pub fn mep_cost(&self) -> f64 {
        self.mep_cost
    }

    pub fn labor_cost(&self) -> f64 {
        self.labor_cost
    }

    pub fn contingency_cost(&self) -> f64 {
        self.contingency_cost
    }

    pub fn total_estimate(&self) -> f64 {
        self.total_estimate
    }

    /// Structural + architectural + MEP, before labor and contingency
    pub fn subtotal(&self) -> f64 {
        self.structural_cost + self.architectural_cost + self.mep_cost
    }

    /// Cost for a single category
    pub fn cost_for(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Structural => self.structural_cost,
            CostCategory::Architectural => self.architectural_cost,
            CostCategory::Mep => self.mep_cost,
            CostCategory::Labor => self.labor_cost,
            CostCategory::Contingency => self.contingency_cost,
        }
    }

    /// Breakdown lines in display order
    pub fn lines(&self) -> impl Iterator<Item = (CostCategory, f64)> + '_ {
        CostCategory::ALL
            .into_iter()
            .map(move |category| (category, self.cost_for(category)))
    }

    /// Cost per unit of gross area
    pub fn cost_per_area(&self) -> f64 {
        self.total_estimate / self.total_area
    }
}
