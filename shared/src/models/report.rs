//! Disease report models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A disease report as stored, without joined context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseReport {
    pub report_id: i32,
    pub farm_id: i32,
    pub crop_id: i32,
    pub disease_name: String,
    pub report_date: DateTime<Utc>,
    pub severity: i32,
    pub description: String,
}

/// A disease report enriched at read time with the owning farm's coordinates
/// and the crop's type name. This is the shape the map and chart consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportWithContext {
    pub report_id: i32,
    pub farm_id: i32,
    pub crop_id: i32,
    pub disease_name: String,
    pub report_date: DateTime<Utc>,
    pub severity: i32,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub crop_type: String,
}

impl ReportWithContext {
    /// Calendar date the report was made on. Filtering and trend grouping
    /// operate on dates, not timestamps.
    pub fn date(&self) -> NaiveDate {
        self.report_date.date_naive()
    }
}
