use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::validate_ticket_id;
use super::{
    ApiError, ApiResponse, AppState, CreateTicketRequest, HistoryDto, TicketDto,
    UpdateStatusRequest, UpdateTicketRequest,
};

pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TicketDto>>>, ApiError> {
    let tickets = state.ticket_service().list().await?;
    Ok(Json(ApiResponse::success(tickets)))
}

pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketDto>>), ApiError> {
    let ticket = state.ticket_service().create(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ticket))))
}

pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    let id = validate_ticket_id(id)?;
    let ticket = state.ticket_service().get(id).await?;
    Ok(Json(ApiResponse::success(ticket)))
}

pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTicketRequest>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    let id = validate_ticket_id(id)?;
    let ticket = state.ticket_service().update(id, payload).await?;
    Ok(Json(ApiResponse::success(ticket)))
}

/// `PATCH /api/tickets/{id}/status`
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<TicketDto>>, ApiError> {
    let id = validate_ticket_id(id)?;
    let ticket = state.ticket_service().update_status(id, payload).await?;
    Ok(Json(ApiResponse::success(ticket)))
}

pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_ticket_id(id)?;
    state.ticket_service().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn ticket_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<HistoryDto>>>, ApiError> {
    let id = validate_ticket_id(id)?;
    let entries = state.history_service().list_for_ticket(id).await?;
    Ok(Json(ApiResponse::success(entries)))
}
