use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};
use validator::Validate;

use crate::errors::ServiceError;
use crate::services::catalog::ServicePayload;
use crate::AppState;

async fn list_services(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let services = state.catalog.list_services().await?;
    Ok(Json(services))
}

async fn list_active_services(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let services = state.catalog.list_active_services().await?;
    Ok(Json(services))
}

async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let service = state
        .catalog
        .get_service(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Service not found with id: {}", id)))?;
    Ok(Json(service))
}

async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let created = state.catalog.create_service(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let updated = state.catalog.update_service(id, payload).await?;
    Ok(Json(updated))
}

async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_service_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let toggled = state.catalog.toggle_service_status(id).await?;
    Ok(Json(toggled))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services))
        .route("/", post(create_service))
        .route("/active", get(list_active_services))
        .route("/:id", get(get_service))
        .route("/:id", put(update_service))
        .route("/:id", delete(delete_service))
        .route("/:id/toggle", patch(toggle_service_status))
}
