//! Estimator - cost estimation engine
//!
//! See `engine.rs` for the algorithm.

pub mod engine;

pub use engine::{estimate, EstimateError, Estimator};
