//! Project input model
//!
//! Describes a building project to be estimated:
//! - Per-floor area and number of identical floors
//! - Building type (Residential, Commercial)
//! - Finish level (Basic, Standard, Premium)
//! - Location class (Metro, Provincial, Remote)
//!
//! Category fields are optional. A category that is missing or not
//! recognized is stored as `None` and resolves to the neutral multiplier
//! (1.0) during estimation, it never aborts the computation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::estimator::EstimateError;

/// Error returned by the strict `FromStr` implementations of the
/// category enums.
///
/// Estimation never surfaces this error: form parsing and JSON
/// deserialization of [`ProjectInput`] turn it into an absent category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseCategoryError {
    kind: &'static str,
    value: String,
}

impl ParseCategoryError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// Category kind that failed to parse (e.g. "finish level")
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input text
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Building type
///
/// Commercial buildings carry higher compliance and structural load
/// requirements than residential ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    Residential,
    Commercial,
}

impl BuildingType {
    pub const ALL: [BuildingType; 2] = [BuildingType::Residential, BuildingType::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Residential => "residential",
            BuildingType::Commercial => "commercial",
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingType {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(BuildingType::Residential),
            "commercial" => Ok(BuildingType::Commercial),
            _ => Err(ParseCategoryError::new("building type", s)),
        }
    }
}

/// Finish level
///
/// Finish quality affects surfaces and building systems (architectural
/// and MEP work) but not the structural frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishLevel {
    /// Rough/basic finish
    Basic,
    /// Standard finish (neutral)
    Standard,
    /// Luxury finish
    Premium,
}

impl FinishLevel {
    pub const ALL: [FinishLevel; 3] = [
        FinishLevel::Basic,
        FinishLevel::Standard,
        FinishLevel::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinishLevel::Basic => "basic",
            FinishLevel::Standard => "standard",
            FinishLevel::Premium => "premium",
        }
    }
}

impl fmt::Display for FinishLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinishLevel {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(FinishLevel::Basic),
            "standard" => Ok(FinishLevel::Standard),
            "premium" => Ok(FinishLevel::Premium),
            _ => Err(ParseCategoryError::new("finish level", s)),
        }
    }
}

/// Location class
///
/// Remote sites cost more due to logistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationClass {
    Metro,
    Provincial,
    Remote,
}

impl LocationClass {
    pub const ALL: [LocationClass; 3] = [
        LocationClass::Metro,
        LocationClass::Provincial,
        LocationClass::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationClass::Metro => "metro",
            LocationClass::Provincial => "provincial",
            LocationClass::Remote => "remote",
        }
    }
}

impl fmt::Display for LocationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationClass {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metro" => Ok(LocationClass::Metro),
            "provincial" => Ok(LocationClass::Provincial),
            "remote" => Ok(LocationClass::Remote),
            _ => Err(ParseCategoryError::new("location class", s)),
        }
    }
}

/// Raw category value as it appears in JSON.
///
/// Anything that is not a string is accepted and discarded so that a
/// malformed category never fails deserialization of the whole input.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_category<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<RawCategory> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCategory::Text(text)) => text.parse().ok(),
        Some(RawCategory::Other(_)) | None => None,
    })
}

/// A building project to estimate
///
/// # Example
/// ```
/// use esquared_estimator_core::{BuildingType, FinishLevel, LocationClass, ProjectInput};
///
/// let input = ProjectInput::new(50.0, 2)
///     .with_building_type(BuildingType::Commercial)
///     .with_finish(FinishLevel::Basic)
///     .with_location(LocationClass::Remote);
/// assert_eq!(input.total_area(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// Floor area of a single floor (area units)
    pub area: f64,

    /// Number of identical floors (must be at least 1)
    #[serde(alias = "floors")]
    pub floor_count: u32,

    /// Building type, `None` when missing or unrecognized
    #[serde(
        default,
        alias = "type",
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_type: Option<BuildingType>,

    /// Finish level, `None` when missing or unrecognized
    #[serde(
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub finish: Option<FinishLevel>,

    /// Location class, `None` when missing or unrecognized
    #[serde(
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<LocationClass>,
}

impl ProjectInput {
    /// Create an input with no categories set (all neutral)
    pub fn new(area: f64, floor_count: u32) -> Self {
        Self {
            area,
            floor_count,
            building_type: None,
            finish: None,
            location: None,
        }
    }

    pub fn with_building_type(mut self, building_type: BuildingType) -> Self {
        self.building_type = Some(building_type);
        self
    }

    pub fn with_finish(mut self, finish: FinishLevel) -> Self {
        self.finish = Some(finish);
        self
    }

    pub fn with_location(mut self, location: LocationClass) -> Self {
        self.location = Some(location);
        self
    }

    /// Gross floor area across all floors
    pub fn total_area(&self) -> f64 {
        self.area * f64::from(self.floor_count)
    }

    /// Check the numeric preconditions of estimation
    ///
    /// # Errors
    /// - `InvalidArea` if area is not a finite number greater than zero
    /// - `InvalidFloorCount` if floor count is zero
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(EstimateError::InvalidArea(self.area.to_string()));
        }
        if self.floor_count == 0 {
            return Err(EstimateError::InvalidFloorCount(self.floor_count.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing_is_case_insensitive() {
        assert_eq!("Premium".parse::<FinishLevel>(), Ok(FinishLevel::Premium));
        assert_eq!(" REMOTE ".parse::<LocationClass>(), Ok(LocationClass::Remote));
        assert_eq!("commercial".parse::<BuildingType>(), Ok(BuildingType::Commercial));
    }

    #[test]
    fn test_unknown_category_is_strict_error() {
        let err = "luxury".parse::<FinishLevel>().unwrap_err();
        assert_eq!(err.kind(), "finish level");
        assert_eq!(err.value(), "luxury");
        assert_eq!(err.to_string(), "Unknown finish level 'luxury'");
    }

    #[test]
    fn test_display_matches_parse() {
        for finish in FinishLevel::ALL {
            assert_eq!(finish.to_string().parse::<FinishLevel>(), Ok(finish));
        }
        for location in LocationClass::ALL {
            assert_eq!(location.to_string().parse::<LocationClass>(), Ok(location));
        }
        for building_type in BuildingType::ALL {
            assert_eq!(building_type.to_string().parse::<BuildingType>(), Ok(building_type));
        }
    }

    #[test]
    fn test_total_area_keeps_fractional_area() {
        let input = ProjectInput::new(12.75, 3);
        assert_eq!(input.total_area(), 38.25);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert_eq!(
            ProjectInput::new(0.0, 1).validate(),
            Err(EstimateError::InvalidArea("0".to_string()))
        );
        assert!(matches!(
            ProjectInput::new(-10.0, 1).validate(),
            Err(EstimateError::InvalidArea(_))
        ));
        assert!(matches!(
            ProjectInput::new(f64::NAN, 1).validate(),
            Err(EstimateError::InvalidArea(_))
        ));
        assert_eq!(
            ProjectInput::new(10.0, 0).validate(),
            Err(EstimateError::InvalidFloorCount("0".to_string()))
        );
        assert!(ProjectInput::new(10.0, 1).validate().is_ok());
    }

    #[test]
    fn test_deserialize_accepts_form_style_keys() {
        let json = r#"{"area": 50.0, "floors": 2, "type": "commercial", "finish": "basic", "location": "remote"}"#;
        let input: ProjectInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.floor_count, 2);
        assert_eq!(input.building_type, Some(BuildingType::Commercial));
        assert_eq!(input.finish, Some(FinishLevel::Basic));
        assert_eq!(input.location, Some(LocationClass::Remote));
    }

    #[test]
    fn test_deserialize_unknown_categories_as_absent() {
        let json = r#"{"area": 100.0, "floor_count": 1, "building_type": "industrial", "finish": 7, "location": null}"#;
        let input: ProjectInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, ProjectInput::new(100.0, 1));
    }

    #[test]
    fn test_serialize_omits_absent_categories() {
        let input = ProjectInput::new(100.0, 1).with_finish(FinishLevel::Premium);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["finish"], "premium");
        assert!(json.get("location").is_none());
        assert!(json.get("building_type").is_none());
    }
}
