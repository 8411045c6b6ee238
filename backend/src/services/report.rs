//! Disease report service: listing with filters, and form submission

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use shared::filter::{date_bounds, filter_reports};
use shared::types::{DateRange, DiseaseFilter};
use shared::validation::{validate_description, validate_disease_name, validate_severity};

use crate::error::{AppError, AppResult};
use crate::models::{DiseaseReport, ReportWithContext};
use crate::services::datasource::{DataSource, SubmitReportInput};

/// Filter selections as they arrive from the query string. Absent dates
/// default to the bounds of the data, absent disease to "All".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub disease: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Report service over the selected data source
#[derive(Clone)]
pub struct ReportService {
    datasource: Arc<DataSource>,
}

impl ReportService {
    pub fn new(datasource: Arc<DataSource>) -> Self {
        Self { datasource }
    }

    /// The joined report view narrowed by the given selections.
    pub async fn list_reports(&self, query: &ReportQuery) -> AppResult<Vec<ReportWithContext>> {
        let snapshot = self.datasource.load().await?;
        Ok(apply_query(&snapshot.reports, query))
    }

    /// Validate and submit one report. Connected mode only; the data source
    /// invalidates its memoized load on success.
    pub async fn submit_report(&self, input: SubmitReportInput) -> AppResult<DiseaseReport> {
        validate_input(&input)?;
        self.datasource.submit(input).await
    }
}

/// Resolve the query against the snapshot and filter. A snapshot with no
/// reports at all yields an empty result for any query.
pub fn apply_query(reports: &[ReportWithContext], query: &ReportQuery) -> Vec<ReportWithContext> {
    let disease = query
        .disease
        .as_deref()
        .map(DiseaseFilter::parse)
        .unwrap_or_default();

    let Some(bounds) = date_bounds(reports) else {
        return Vec::new();
    };
    let range = DateRange::new(
        query.start_date.unwrap_or(bounds.start),
        query.end_date.unwrap_or(bounds.end),
    );

    filter_reports(reports, &disease, &range)
}

fn validate_input(input: &SubmitReportInput) -> AppResult<()> {
    validate_disease_name(&input.disease_name).map_err(|message| AppError::Validation {
        field: "disease_name".to_string(),
        message: message.to_string(),
    })?;
    validate_severity(input.severity).map_err(|message| AppError::Validation {
        field: "severity".to_string(),
        message: message.to_string(),
    })?;
    validate_description(&input.description).map_err(|message| AppError::Validation {
        field: "description".to_string(),
        message: message.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::datasource::sample_data;

    #[test]
    fn default_query_keeps_everything() {
        let (_, _, reports) = sample_data();
        let result = apply_query(&reports, &ReportQuery::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn disease_query_narrows_to_exact_matches() {
        let (_, _, reports) = sample_data();
        let query = ReportQuery {
            disease: Some("Rust".to_string()),
            ..Default::default()
        };
        let result = apply_query(&reports, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].severity, 7);
        assert_eq!(result[0].farm_id, 2);
    }

    #[test]
    fn date_query_defaults_missing_ends_to_data_bounds() {
        let (_, _, reports) = sample_data();
        let query = ReportQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 2),
            ..Default::default()
        };
        let result = apply_query(&reports, &query);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn empty_snapshot_yields_empty_result() {
        assert!(apply_query(&[], &ReportQuery::default()).is_empty());
    }

    #[tokio::test]
    async fn submission_rejects_out_of_range_severity() {
        let service = ReportService::new(Arc::new(DataSource::offline()));
        let result = service
            .submit_report(SubmitReportInput {
                farm_id: 1,
                crop_id: 1,
                disease_name: "Blight".to_string(),
                severity: 11,
                description: String::new(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation { ref field, .. }) if field == "severity"));
    }
}
