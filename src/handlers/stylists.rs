use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;

use crate::entities::stylist::StylistStatus;
use crate::errors::ServiceError;
use crate::services::stylists::LoginRequest;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: StylistStatus,
}

async fn list_stylists(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let stylists = state.stylists.list_stylists().await?;
    Ok(Json(stylists))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let stylist = state
        .stylists
        .login(&credentials.mobile, &credentials.password)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized("Invalid mobile number or password".into()))?;
    Ok(Json(stylist))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.stylists.update_status(id, query.status).await?;
    Ok(Json(updated))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stylists))
        .route("/login", post(login))
        .route("/:id/status", patch(update_status))
}
