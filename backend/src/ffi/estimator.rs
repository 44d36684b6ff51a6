//! PyO3 wrapper for Estimator
//!
//! This module provides the Python interface to the Rust estimator.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{breakdown_to_py, parse_project_input, to_py_err};
use crate::costs::EstimatorConfig;
use crate::estimator::Estimator as RustEstimator;

/// Python wrapper for Rust Estimator
///
/// # Example (from Python)
///
/// ```python
/// from esquared_estimator_core import Estimator
///
/// est = Estimator()
/// result = est.estimate({"area": 100, "floors": 1, "finish": "premium"})
/// print(result["total_estimate"])
/// ```
#[pyclass(name = "Estimator")]
pub struct PyEstimator {
    inner: RustEstimator,
}

#[pymethods]
impl PyEstimator {
    /// Create an estimator, optionally from a JSON config
    ///
    /// Raises ValueError if the config cannot be parsed or is out of range.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EstimatorConfig::from_json(json).map_err(to_py_err)?,
            None => EstimatorConfig::default(),
        };
        let inner = RustEstimator::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Estimate a project given as a dict; returns the breakdown as a dict
    fn estimate<'py>(
        &self,
        py: Python<'py>,
        input: &Bound<'py, PyDict>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let input = parse_project_input(input)?;
        let breakdown = self.inner.estimate(&input).map_err(to_py_err)?;
        breakdown_to_py(py, &breakdown)
    }

    /// Estimate a project and return a new quote as a JSON string
    fn quote(&self, input: &Bound<'_, PyDict>) -> PyResult<String> {
        let input = parse_project_input(input)?;
        let quote = self.inner.quote(input).map_err(to_py_err)?;
        serde_json::to_string(&quote).map_err(to_py_err)
    }

    /// SHA256 fingerprint of the active config
    #[getter]
    fn config_hash(&self) -> String {
        self.inner.config_hash().to_string()
    }
}
