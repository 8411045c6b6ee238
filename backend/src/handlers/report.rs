//! Disease report HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::datasource::SubmitReportInput;
use crate::services::report::{ReportQuery, ReportService};
use crate::AppState;

/// List joined reports narrowed by the filter selections
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let service = ReportService::new(state.datasource.clone());

    match service.list_reports(&query).await {
        Ok(reports) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reports": reports })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Submit a new disease report (the form's target)
pub async fn submit_report(
    State(state): State<AppState>,
    Json(input): Json<SubmitReportInput>,
) -> impl IntoResponse {
    let service = ReportService::new(state.datasource.clone());

    match service.submit_report(input).await {
        Ok(report) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Report submitted successfully!",
                "report": report,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
