//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the Rust estimator to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only expose what's needed
//! 2. **Simple types**: Use primitives, strings, dicts at boundary
//! 3. **Safe errors**: Convert all Rust errors to Python `ValueError`

pub mod estimator;
pub mod types;
