use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::queue_entry::QueueStatus;
use crate::errors::ServiceError;
use crate::services::queue::JoinQueuePayload;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: QueueStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WaitingCountResponse {
    waiting_count: u64,
}

async fn list_entries(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.queue.list_entries().await?;
    Ok(Json(entries))
}

async fn waiting_queue(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.queue.waiting_queue().await?;
    Ok(Json(entries))
}

async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let entry = state
        .queue
        .get_entry(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Queue entry not found with id: {}", id)))?;
    Ok(Json(entry))
}

async fn waiting_count(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let waiting_count = state.queue.waiting_count().await?;
    Ok(Json(WaitingCountResponse { waiting_count }))
}

async fn today_queue(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.queue.today_queue().await?;
    Ok(Json(entries))
}

async fn join_queue(
    State(state): State<AppState>,
    Json(payload): Json<JoinQueuePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let created = state
        .queue
        .join_queue(payload)
        .await
        .map_err(ServiceError::into_creation_failure)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_queue_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.queue.update_queue_status(id, query.status).await?;
    Ok(Json(updated))
}

async fn move_to_next(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.queue.move_to_next(id).await?;
    Ok(Json(updated))
}

async fn complete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.queue.complete_service(id).await?;
    Ok(Json(updated))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.queue.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries))
        .route("/waiting", get(waiting_queue))
        .route("/waiting-count", get(waiting_count))
        .route("/today", get(today_queue))
        .route("/join", post(join_queue))
        .route("/:id", get(get_entry))
        .route("/:id", delete(delete_entry))
        .route("/:id/status", patch(update_queue_status))
        .route("/:id/next", patch(move_to_next))
        .route("/:id/complete", patch(complete_service))
}
