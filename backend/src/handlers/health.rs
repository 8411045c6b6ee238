//! Health and status handlers

use axum::{extract::State, Json};
use serde::Serialize;
use shared::Theme;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub datasource: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let datasource = if state.datasource.is_offline() {
        "offline".to_string()
    } else {
        "connected".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        datasource,
    })
}

#[derive(Serialize)]
pub struct StatusResponse {
    /// True when the startup connection failed and sample data is in use.
    /// The frontend shows the warning banner off this flag.
    pub offline: bool,
    /// False in offline mode; the submission form is disabled entirely.
    pub reporting_enabled: bool,
    pub theme: Theme,
}

/// Status endpoint: drives the warning banner and the form enablement
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let offline = state.datasource.is_offline();
    Json(StatusResponse {
        offline,
        reporting_enabled: !offline,
        theme: state.config.display.theme,
    })
}
