//! Route definitions for the Crop Disease Tracker

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Offline/reporting status (warning banner, form enablement)
        .route("/status", get(handlers::get_status))
        // Reference data
        .route("/farms", get(handlers::list_farms))
        .route("/farms/:farm_id/crops", get(handlers::list_farm_crops))
        // Reports: filtered listing and form submission
        .route(
            "/reports",
            get(handlers::list_reports).post(handlers::submit_report),
        )
        // Composed map/chart view model
        .route("/dashboard", get(handlers::get_dashboard))
}
