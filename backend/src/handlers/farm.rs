//! Farm and crop reference-data handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::AppState;

/// List all farms (form farm selector)
pub async fn list_farms(State(state): State<AppState>) -> impl IntoResponse {
    match state.datasource.load().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(serde_json::json!({ "farms": snapshot.farms })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List the crops of one farm (dependent crop selector)
pub async fn list_farm_crops(
    State(state): State<AppState>,
    Path(farm_id): Path<i32>,
) -> impl IntoResponse {
    match state.datasource.crops_for_farm(farm_id).await {
        Ok(crops) => (StatusCode::OK, Json(serde_json::json!({ "crops": crops }))).into_response(),
        Err(e) => e.into_response(),
    }
}
