use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::clock::Clock;
use crate::db::DbPool;
use crate::entities::appointment::{self, AppointmentStatus};
use crate::entities::service;
use crate::errors::ServiceError;

/// How far ahead the upcoming window looks.
const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Payload for booking or rescheduling an appointment.
///
/// A caller-supplied status is ignored: creation always starts the lifecycle
/// at PENDING, and plain updates never touch the status.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub service_id: Option<i64>,
}

/// An appointment joined with the service it references. The service is
/// `None` when the catalog entry has been deleted out from under it.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentWithService {
    #[serde(flatten)]
    pub appointment: appointment::Model,
    pub service: Option<service::Model>,
}

impl From<(appointment::Model, Option<service::Model>)> for AppointmentWithService {
    fn from((appointment, service): (appointment::Model, Option<service::Model>)) -> Self {
        Self {
            appointment,
            service,
        }
    }
}

/// Manager for the appointment book.
#[derive(Clone)]
pub struct AppointmentService {
    db: Arc<DbPool>,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(db: Arc<DbPool>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Lists every appointment.
    #[instrument(skip(self))]
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let rows = appointment::Entity::find()
            .find_also_related(service::Entity)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Gets an appointment by id.
    #[instrument(skip(self))]
    pub async fn get_appointment(
        &self,
        id: i64,
    ) -> Result<Option<AppointmentWithService>, ServiceError> {
        let row = appointment::Entity::find_by_id(id)
            .find_also_related(service::Entity)
            .one(&*self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Appointments on an exact date.
    #[instrument(skip(self))]
    pub async fn appointments_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let rows = appointment::Entity::find()
            .find_also_related(service::Entity)
            .filter(appointment::Column::AppointmentDate.eq(date))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Appointments within `[start_date, end_date]`, both ends inclusive.
    #[instrument(skip(self))]
    pub async fn appointments_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let rows = appointment::Entity::find()
            .find_also_related(service::Entity)
            .filter(appointment::Column::AppointmentDate.between(start_date, end_date))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Appointments in a given lifecycle state.
    #[instrument(skip(self))]
    pub async fn appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let rows = appointment::Entity::find()
            .find_also_related(service::Entity)
            .filter(appointment::Column::Status.eq(status))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Appointments booked under a mobile number.
    #[instrument(skip(self))]
    pub async fn appointments_by_mobile(
        &self,
        mobile: &str,
    ) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let rows = appointment::Entity::find()
            .find_also_related(service::Entity)
            .filter(appointment::Column::Mobile.eq(mobile))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Appointments scheduled for today.
    #[instrument(skip(self))]
    pub async fn today_appointments(&self) -> Result<Vec<AppointmentWithService>, ServiceError> {
        self.appointments_by_date(self.clock.today()).await
    }

    /// Appointments from today through the next thirty days, inclusive.
    #[instrument(skip(self))]
    pub async fn upcoming_appointments(&self) -> Result<Vec<AppointmentWithService>, ServiceError> {
        let today = self.clock.today();
        self.appointments_by_date_range(today, today + Duration::days(UPCOMING_WINDOW_DAYS))
            .await
    }

    /// Books an appointment. The referenced service must exist; the initial
    /// status is always PENDING regardless of the payload.
    #[instrument(skip(self, payload))]
    pub async fn create_appointment(
        &self,
        payload: AppointmentPayload,
    ) -> Result<AppointmentWithService, ServiceError> {
        let service_id = payload
            .service_id
            .ok_or_else(|| ServiceError::ValidationError("Service is required".to_string()))?;

        let service = service::Entity::find_by_id(service_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Service not found with id: {}", service_id))
            })?;

        let now = self.clock.now();
        let created = appointment::ActiveModel {
            id: NotSet,
            customer_name: Set(payload.customer_name),
            mobile: Set(payload.mobile),
            appointment_date: Set(payload.appointment_date),
            appointment_time: Set(payload.appointment_time),
            service_id: Set(service.id),
            status: Set(AppointmentStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(appointment_id = created.id, "booked appointment");
        Ok((created, Some(service)).into())
    }

    /// Reschedules an appointment: customer, mobile, date and time are
    /// overwritten; a supplied service id is re-resolved before anything is
    /// applied, so a failed lookup persists nothing. Status is untouched.
    #[instrument(skip(self, payload))]
    pub async fn update_appointment(
        &self,
        id: i64,
        payload: AppointmentPayload,
    ) -> Result<AppointmentWithService, ServiceError> {
        let existing = appointment::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Appointment not found with id: {}", id))
            })?;

        let new_service = match payload.service_id {
            Some(service_id) => Some(
                service::Entity::find_by_id(service_id)
                    .one(&*self.db)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!(
                            "Service not found with id: {}",
                            service_id
                        ))
                    })?,
            ),
            None => None,
        };

        let mut active: appointment::ActiveModel = existing.into();
        active.customer_name = Set(payload.customer_name);
        active.mobile = Set(payload.mobile);
        active.appointment_date = Set(payload.appointment_date);
        active.appointment_time = Set(payload.appointment_time);
        if let Some(service) = &new_service {
            active.service_id = Set(service.id);
        }
        active.updated_at = Set(self.clock.now());

        let updated = active.update(&*self.db).await?;

        let service = match new_service {
            Some(service) => Some(service),
            None => {
                service::Entity::find_by_id(updated.service_id)
                    .one(&*self.db)
                    .await?
            }
        };

        Ok((updated, service).into())
    }

    /// Sets the lifecycle status directly. No transition validation:
    /// CANCELLED back to PENDING is allowed.
    #[instrument(skip(self))]
    pub async fn update_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<AppointmentWithService, ServiceError> {
        let row = appointment::Entity::find_by_id(id)
            .find_also_related(service::Entity)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Appointment not found with id: {}", id))
            })?;
        let (existing, service) = row;

        let mut active: appointment::ActiveModel = existing.into();
        active.status = Set(status);
        active.updated_at = Set(self.clock.now());

        let updated = active.update(&*self.db).await?;
        Ok((updated, service).into())
    }

    /// Deletes an appointment by id.
    #[instrument(skip(self))]
    pub async fn delete_appointment(&self, id: i64) -> Result<(), ServiceError> {
        appointment::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}
