use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, CreateHistoryRequest, HistoryDto, UpdateHistoryRequest,
};

pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<HistoryDto>>>, ApiError> {
    let entries = state.history_service().list().await?;
    Ok(Json(ApiResponse::success(entries)))
}

pub async fn create_history(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateHistoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HistoryDto>>), ApiError> {
    let entry = state.history_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<HistoryDto>>, ApiError> {
    let id = validate_id("history", id)?;
    let entry = state.history_service().get(id).await?;
    Ok(Json(ApiResponse::success(entry)))
}

/// Only the comment of an entry can be changed.
pub async fn update_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateHistoryRequest>,
) -> Result<Json<ApiResponse<HistoryDto>>, ApiError> {
    let id = validate_id("history", id)?;
    let entry = state.history_service().update_comment(id, payload).await?;
    Ok(Json(ApiResponse::success(entry)))
}
