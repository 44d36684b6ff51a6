//! Raw project form
//!
//! The estimate request form collects every field as text. `ProjectForm`
//! turns those fields into a validated [`ProjectInput`]: numeric fields must
//! parse cleanly, category fields are matched leniently.

use serde::{Deserialize, Serialize};

use super::project::ProjectInput;
use crate::estimator::EstimateError;

/// Unparsed form fields, exactly as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub area: String,
    pub floors: String,
    #[serde(rename = "type")]
    pub building_type: String,
    pub finish: String,
    pub location: String,
}

impl ProjectForm {
    /// Parse the form into a project input
    ///
    /// Category fields that are empty or unrecognized become `None`.
    ///
    /// # Errors
    /// - `InvalidArea` if area is not a finite number greater than zero
    /// - `InvalidFloorCount` if floors is not a whole number of at least 1
    pub fn parse(&self) -> Result<ProjectInput, EstimateError> {
        let input = ProjectInput {
            area: parse_area(&self.area)?,
            floor_count: parse_floor_count(&self.floors)?,
            building_type: self.building_type.parse().ok(),
            finish: self.finish.parse().ok(),
            location: self.location.parse().ok(),
        };
        Ok(input)
    }
}

fn parse_area(raw: &str) -> Result<f64, EstimateError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(area) if area.is_finite() && area > 0.0 => Ok(area),
        _ => Err(EstimateError::InvalidArea(trimmed.to_string())),
    }
}

fn parse_floor_count(raw: &str) -> Result<u32, EstimateError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(floors) if floors > 0 => Ok(floors),
        _ => Err(EstimateError::InvalidFloorCount(trimmed.to_string())),
    }
}
