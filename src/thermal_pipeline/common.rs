//! Common utilities module
//!
//! Shared error types used by every stage of the thermal pipeline.

pub mod error;

pub use error::{ThermalError, Result};
