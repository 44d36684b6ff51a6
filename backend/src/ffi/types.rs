//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::fmt::Display;
use std::str::FromStr;

use crate::estimator::EstimateError;
use crate::models::{CostBreakdown, ProjectInput};

/// Map any core error to a Python `ValueError`
pub(crate) fn to_py_err(err: impl Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing, or the type conversion
/// error if it cannot be extracted as `T`.
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract an optional category field.
///
/// Missing, `None`, non-string and unrecognized values all map to `None`.
fn extract_category<T: FromStr>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>> {
    Ok(dict
        .get_item(key)?
        .and_then(|value| value.extract::<String>().ok())
        .and_then(|text| text.parse().ok()))
}

/// Build a `ProjectInput` from a Python dict
///
/// Expected keys: `area`, `floors` (or `floor_count`), and optional
/// `type`, `finish`, `location`.
pub(crate) fn parse_project_input(dict: &Bound<'_, PyDict>) -> PyResult<ProjectInput> {
    let area: f64 = extract_required(dict, "area")?;

    let floors = match dict.get_item("floors")? {
        Some(value) => value,
        None => dict
            .get_item("floor_count")?
            .ok_or_else(|| PyValueError::new_err("Missing required field 'floors'"))?,
    };
    let floor_count = floors
        .extract::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| to_py_err(EstimateError::InvalidFloorCount(floors.to_string())))?;

    Ok(ProjectInput {
        area,
        floor_count,
        building_type: extract_category(dict, "type")?,
        finish: extract_category(dict, "finish")?,
        location: extract_category(dict, "location")?,
    })
}

/// Convert a breakdown to a Python dict
pub(crate) fn breakdown_to_py<'py>(
    py: Python<'py>,
    breakdown: &CostBreakdown,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("total_area", breakdown.total_area())?;
    dict.set_item("structural_cost", breakdown.structural_cost())?;
    dict.set_item("architectural_cost", breakdown.architectural_cost())?;
    dict.set_item("mep_cost", breakdown.mep_cost())?;
    dict.set_item("labor_cost", breakdown.labor_cost())?;
    dict.set_item("contingency_cost", breakdown.contingency_cost())?;
    dict.set_item("total_estimate", breakdown.total_estimate())?;
    Ok(dict)
}
