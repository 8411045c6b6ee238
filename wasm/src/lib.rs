//! WebAssembly module for the Crop Disease Tracker
//!
//! Provides client-side computation for:
//! - Report filtering and the severity trend series
//! - Marker radius and color mapping
//! - Offline form validation

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use shared::chart::{MapMarker, MarkerColor};
use shared::filter::{date_bounds, disease_options, filter_reports, severity_trend};
use shared::models::ReportWithContext;
use shared::types::{DateRange, DiseaseFilter};
use shared::validation;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_reports(reports_json: &str) -> Result<Vec<ReportWithContext>, JsValue> {
    serde_json::from_str(reports_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reports JSON: {}", e)))
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, JsValue> {
    value
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Invalid {} date: {}", field, value)))
}

/// Filter a JSON array of joined reports by disease ("All" for no filter)
/// and an inclusive ISO-8601 date range; returns the filtered JSON array.
#[wasm_bindgen]
pub fn filter_reports_json(
    reports_json: &str,
    disease: &str,
    start_date: &str,
    end_date: &str,
) -> Result<String, JsValue> {
    let reports = parse_reports(reports_json)?;
    let range = DateRange::new(
        parse_date(start_date, "start")?,
        parse_date(end_date, "end")?,
    );
    let filtered = filter_reports(&reports, &DiseaseFilter::parse(disease), &range);

    serde_json::to_string(&filtered).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Per-date mean severity series for a JSON array of reports.
#[wasm_bindgen]
pub fn severity_trend_json(reports_json: &str) -> Result<String, JsValue> {
    let reports = parse_reports(reports_json)?;
    serde_json::to_string(&severity_trend(&reports))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Map markers for a JSON array of reports.
#[wasm_bindgen]
pub fn map_markers_json(reports_json: &str) -> Result<String, JsValue> {
    let reports = parse_reports(reports_json)?;
    let markers: Vec<MapMarker> = reports.iter().map(MapMarker::for_report).collect();
    serde_json::to_string(&markers).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Sorted distinct disease names present in a JSON array of reports.
#[wasm_bindgen]
pub fn disease_options_json(reports_json: &str) -> Result<String, JsValue> {
    let reports = parse_reports(reports_json)?;
    serde_json::to_string(&disease_options(&reports))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Min/max report dates as `[start, end]`, or `null` when there are none.
#[wasm_bindgen]
pub fn date_bounds_json(reports_json: &str) -> Result<String, JsValue> {
    let reports = parse_reports(reports_json)?;
    serde_json::to_string(&date_bounds(&reports)).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Circle radius for a marker of the given severity.
#[wasm_bindgen]
pub fn marker_radius(severity: i32) -> i32 {
    severity * 2
}

/// Marker color class for the given severity ("red" above the threshold,
/// "orange" otherwise).
#[wasm_bindgen]
pub fn marker_color(severity: i32) -> String {
    match MarkerColor::for_severity(severity) {
        MarkerColor::Red => "red".to_string(),
        MarkerColor::Orange => "orange".to_string(),
    }
}

/// Validate the disease name field of the submission form.
#[wasm_bindgen]
pub fn validate_disease_name_field(name: &str) -> bool {
    validation::validate_disease_name(name).is_ok()
}

/// Validate the severity slider value.
#[wasm_bindgen]
pub fn validate_severity_field(severity: i32) -> bool {
    validation::validate_severity(severity).is_ok()
}

/// Validate the description field of the submission form.
#[wasm_bindgen]
pub fn validate_description_field(description: &str) -> bool {
    validation::validate_description(description).is_ok()
}
