//! Shared types, models and calculations for the Farm Management Platform
//!
//! This crate contains the domain model and the pure calculation core shared
//! between the backend, the frontend (via WASM), and other components of the
//! system.

pub mod calculations;
pub mod models;
pub mod types;
pub mod validation;

pub use calculations::*;
pub use models::*;
pub use types::*;
pub use validation::*;
