//! Read-only lookup endpoints used to populate ticket forms.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LookupDto, StatusOptionDto};
use crate::domain::LookupKind;

pub async fn priorities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LookupDto>>>, ApiError> {
    let rows = state.reference_service().list(LookupKind::Priority).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LookupDto>>>, ApiError> {
    let rows = state.reference_service().list(LookupKind::Category).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn statuses(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<StatusOptionDto>>> {
    Json(ApiResponse::success(state.reference_service().statuses()))
}
