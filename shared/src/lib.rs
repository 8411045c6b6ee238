//! Shared types and logic for the Crop Disease Tracker
//!
//! This crate contains the domain model, the filter/aggregation logic and the
//! presentation mapping shared between the backend and the frontend (via WASM).

pub mod chart;
pub mod filter;
pub mod models;
pub mod types;
pub mod validation;

pub use chart::*;
pub use filter::*;
pub use models::*;
pub use types::*;
pub use validation::*;
