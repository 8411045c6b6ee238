//! Domain models for the Crop Disease Tracker

mod crop;
mod farm;
mod report;

pub use crop::*;
pub use farm::*;
pub use report::*;
