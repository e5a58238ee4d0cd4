//! Admin CRUD for the priority and category tables.
//!
//! Both tables share the same handlers; the route picks the table through
//! the [`LookupTable`] type parameter.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, LookupDto, LookupRequest};
use crate::domain::LookupKind;

pub trait LookupTable: Send + Sync + 'static {
    const KIND: LookupKind;
}

pub struct Priorities;

impl LookupTable for Priorities {
    const KIND: LookupKind = LookupKind::Priority;
}

pub struct Categories;

impl LookupTable for Categories {
    const KIND: LookupKind = LookupKind::Category;
}

pub async fn list<T: LookupTable>(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<LookupDto>>>, ApiError> {
    let rows = state.reference_service().list(T::KIND).await?;
    Ok(Json(ApiResponse::success(rows)))
}

pub async fn get<T: LookupTable>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LookupDto>>, ApiError> {
    let id = validate_id(T::KIND.name_field(), id)?;
    let row = state.reference_service().get(T::KIND, id).await?;
    Ok(Json(ApiResponse::success(row)))
}

pub async fn create<T: LookupTable>(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LookupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LookupDto>>), ApiError> {
    let row = state.reference_service().create(T::KIND, payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

pub async fn update<T: LookupTable>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<LookupRequest>,
) -> Result<Json<ApiResponse<LookupDto>>, ApiError> {
    let id = validate_id(T::KIND.name_field(), id)?;
    let row = state
        .reference_service()
        .update(T::KIND, id, payload)
        .await?;
    Ok(Json(ApiResponse::success(row)))
}

pub async fn delete<T: LookupTable>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_id(T::KIND.name_field(), id)?;
    state.reference_service().delete(T::KIND, id).await?;
    Ok(Json(ApiResponse::success(())))
}
