//! Dashboard view handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::Theme;

use crate::services::dashboard::DashboardService;
use crate::services::report::ReportQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub disease: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub theme: Option<String>,
}

/// The composed map/chart view model for one page render
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let service = DashboardService::new(state.datasource.clone());
    let theme = query
        .theme
        .as_deref()
        .map(Theme::parse)
        .unwrap_or(state.config.display.theme);
    let filters = ReportQuery {
        disease: query.disease,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match service.render(&filters, theme).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => e.into_response(),
    }
}
