//! Farm models

use serde::{Deserialize, Serialize};

/// A farm location. Reference data created externally; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Farm {
    pub farm_id: i32,
    pub farm_name: String,
    pub latitude: f64,
    pub longitude: f64,
}
