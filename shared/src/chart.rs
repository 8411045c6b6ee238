//! Presentation mapping for the map and trend chart
//!
//! Pure view-model construction: each render is a function of the current data
//! snapshot and the current selections. The actual tile and chart engines are
//! external collaborators; this module only decides what they are handed.

use serde::{Deserialize, Serialize};

use crate::filter::TrendPoint;
use crate::models::ReportWithContext;
use crate::types::Theme;

/// Default map viewport when no selection says otherwise.
pub const MAP_CENTER: (f64, f64) = (41.0, -99.0);
pub const MAP_ZOOM: u8 = 6;

/// Severity above this renders in the high-severity color.
pub const HIGH_SEVERITY_THRESHOLD: i32 = 5;

/// Marker color classes, not raw CSS: the frontend resolves them per theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Orange,
}

impl MarkerColor {
    pub fn for_severity(severity: i32) -> Self {
        if severity > HIGH_SEVERITY_THRESHOLD {
            MarkerColor::Red
        } else {
            MarkerColor::Orange
        }
    }
}

/// One circle marker on the disease map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub color: MarkerColor,
    pub popup: String,
    pub fill_opacity: f64,
}

impl MapMarker {
    /// Map a joined report to its marker: position from the farm, radius
    /// scaled by severity, color by the severity threshold.
    pub fn for_report(report: &ReportWithContext) -> Self {
        Self {
            latitude: report.latitude,
            longitude: report.longitude,
            radius: report.severity * 2,
            color: MarkerColor::for_severity(report.severity),
            popup: format!(
                "{} - {} (Severity: {})",
                report.crop_type, report.disease_name, report.severity
            ),
            fill_opacity: 0.7,
        }
    }
}

/// The trend chart series plus its theme-dependent styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<TrendPoint>,
    pub line_color: String,
}

impl TrendSeries {
    pub fn new(points: Vec<TrendPoint>, theme: Theme) -> Self {
        Self {
            points,
            line_color: theme.line_color().to_string(),
        }
    }
}
