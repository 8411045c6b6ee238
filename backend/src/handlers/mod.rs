//! HTTP handlers for the Crop Disease Tracker

mod dashboard;
mod farm;
mod health;
mod report;

pub use dashboard::*;
pub use farm::*;
pub use health::*;
pub use report::*;
