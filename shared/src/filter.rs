//! Report filtering and severity aggregation
//!
//! Pure functions over an in-memory snapshot of joined reports. Every user
//! interaction re-runs this pipeline from the top: narrow the report set, then
//! compute the per-date mean severity series for the trend chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ReportWithContext;
use crate::types::{DateRange, DiseaseFilter};

/// One point of the severity trend: the arithmetic mean of all severities
/// reported on a single date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mean_severity: f64,
}

/// Narrow `reports` to those matching the disease selector and falling inside
/// the inclusive date range. Input order is preserved.
pub fn filter_reports(
    reports: &[ReportWithContext],
    disease: &DiseaseFilter,
    range: &DateRange,
) -> Vec<ReportWithContext> {
    reports
        .iter()
        .filter(|r| disease.matches(&r.disease_name) && range.contains(r.date()))
        .cloned()
        .collect()
}

/// Per-date mean severity over the filtered set, one point per distinct date,
/// ascending. An empty input yields an empty series, not an error.
pub fn severity_trend(reports: &[ReportWithContext]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, (i64, u32)> = BTreeMap::new();
    for report in reports {
        let entry = by_date.entry(report.date()).or_insert((0, 0));
        entry.0 += i64::from(report.severity);
        entry.1 += 1;
    }

    by_date
        .into_iter()
        .map(|(date, (sum, count))| TrendPoint {
            date,
            mean_severity: sum as f64 / f64::from(count),
        })
        .collect()
}

/// Distinct disease names present in the data, sorted. The UI prepends the
/// `"All"` sentinel itself.
pub fn disease_options(reports: &[ReportWithContext]) -> Vec<String> {
    let mut names: Vec<String> = reports.iter().map(|r| r.disease_name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Min/max report dates present, used to bound the date-range picker.
/// `None` when there are no reports at all.
pub fn date_bounds(reports: &[ReportWithContext]) -> Option<DateRange> {
    let min = reports.iter().map(|r| r.date()).min()?;
    let max = reports.iter().map(|r| r.date()).max()?;
    Some(DateRange::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn report(id: i32, disease: &str, date: (i32, u32, u32), severity: i32) -> ReportWithContext {
        ReportWithContext {
            report_id: id,
            farm_id: id,
            crop_id: id,
            disease_name: disease.to_string(),
            report_date: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 12, 0, 0)
                .unwrap(),
            severity,
            description: String::new(),
            latitude: 41.0,
            longitude: -99.0,
            crop_type: "Wheat".to_string(),
        }
    }

    fn full_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn disease_filter_keeps_only_matching_reports() {
        let reports = vec![
            report(1, "Blight", (2024, 3, 1), 5),
            report(2, "Rust", (2024, 3, 2), 7),
            report(3, "Mildew", (2024, 3, 3), 3),
        ];
        let filtered = filter_reports(
            &reports,
            &DiseaseFilter::Only("Rust".to_string()),
            &full_range(),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].disease_name, "Rust");
        assert_eq!(filtered[0].severity, 7);
        assert_eq!(filtered[0].farm_id, 2);
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let reports = vec![
            report(1, "Blight", (2024, 3, 1), 5),
            report(2, "Blight", (2024, 3, 2), 7),
            report(3, "Blight", (2024, 3, 3), 3),
        ];
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        let filtered = filter_reports(&reports, &DiseaseFilter::All, &range);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| range.contains(r.date())));
    }

    #[test]
    fn empty_input_yields_empty_trend() {
        assert_eq!(severity_trend(&[]), Vec::new());
    }

    #[test]
    fn trend_groups_by_exact_date_and_averages() {
        let reports = vec![
            report(1, "Blight", (2024, 3, 1), 4),
            report(2, "Blight", (2024, 3, 1), 8),
            report(3, "Rust", (2024, 3, 2), 7),
        ];
        let trend = severity_trend(&reports);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(trend[0].mean_severity, 6.0);
        assert_eq!(trend[1].mean_severity, 7.0);
    }

    #[test]
    fn trend_is_ordered_by_date_ascending() {
        let reports = vec![
            report(1, "Mildew", (2024, 3, 3), 3),
            report(2, "Blight", (2024, 3, 1), 5),
            report(3, "Rust", (2024, 3, 2), 7),
        ];
        let trend = severity_trend(&reports);
        let dates: Vec<NaiveDate> = trend.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn disease_options_are_sorted_and_distinct() {
        let reports = vec![
            report(1, "Rust", (2024, 3, 1), 5),
            report(2, "Blight", (2024, 3, 2), 7),
            report(3, "Rust", (2024, 3, 3), 3),
        ];
        assert_eq!(disease_options(&reports), vec!["Blight", "Rust"]);
    }

    #[test]
    fn date_bounds_span_min_to_max() {
        let reports = vec![
            report(1, "Blight", (2024, 3, 5), 5),
            report(2, "Rust", (2024, 3, 1), 7),
            report(3, "Mildew", (2024, 3, 3), 3),
        ];
        let bounds = date_bounds(&reports).unwrap();
        assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(date_bounds(&[]), None);
    }
}
