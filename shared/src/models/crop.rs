//! Crop models

use serde::{Deserialize, Serialize};

/// A crop grown on a farm. Reference data, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub crop_id: i32,
    pub crop_type: String,
    pub farm_id: i32,
}
