use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::entities::appointment::AppointmentStatus;
use crate::errors::ServiceError;
use crate::services::appointments::AppointmentPayload;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateRangeQuery {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

async fn list_appointments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.list_appointments().await?;
    Ok(Json(appointments))
}

async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointment = state
        .appointments
        .get_appointment(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Appointment not found with id: {}", id)))?;
    Ok(Json(appointment))
}

async fn appointments_by_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.appointments_by_date(date).await?;
    Ok(Json(appointments))
}

async fn appointments_by_date_range(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state
        .appointments
        .appointments_by_date_range(range.start_date, range.end_date)
        .await?;
    Ok(Json(appointments))
}

async fn appointments_by_status(
    State(state): State<AppState>,
    Path(status): Path<AppointmentStatus>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.appointments_by_status(status).await?;
    Ok(Json(appointments))
}

async fn appointments_by_mobile(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.appointments_by_mobile(&mobile).await?;
    Ok(Json(appointments))
}

async fn today_appointments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.today_appointments().await?;
    Ok(Json(appointments))
}

async fn upcoming_appointments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let appointments = state.appointments.upcoming_appointments().await?;
    Ok(Json(appointments))
}

async fn create_appointment(
    State(state): State<AppState>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let created = state
        .appointments
        .create_appointment(payload)
        .await
        .map_err(ServiceError::into_creation_failure)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let updated = state.appointments.update_appointment(id, payload).await?;
    Ok(Json(updated))
}

async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .appointments
        .update_appointment_status(id, query.status)
        .await?;
    Ok(Json(updated))
}

async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.appointments.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments))
        .route("/", post(create_appointment))
        .route("/date/:date", get(appointments_by_date))
        .route("/date-range", get(appointments_by_date_range))
        .route("/status/:status", get(appointments_by_status))
        .route("/mobile/:mobile", get(appointments_by_mobile))
        .route("/today", get(today_appointments))
        .route("/upcoming", get(upcoming_appointments))
        .route("/:id", get(get_appointment))
        .route("/:id", put(update_appointment))
        .route("/:id", delete(delete_appointment))
        .route("/:id/status", patch(update_appointment_status))
}
