//! Database models for the Crop Disease Tracker
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
