use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::service;
use crate::errors::ServiceError;

/// Payload for creating or overwriting a catalog service.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: String,
    pub price: Decimal,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Manager for the catalog of offered services.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Lists every service, active or not.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Vec<service::Model>, ServiceError> {
        let services = service::Entity::find().all(&*self.db).await?;
        Ok(services)
    }

    /// Lists only the services currently offered to customers.
    #[instrument(skip(self))]
    pub async fn list_active_services(&self) -> Result<Vec<service::Model>, ServiceError> {
        let services = service::Entity::find()
            .filter(service::Column::IsActive.eq(true))
            .all(&*self.db)
            .await?;
        Ok(services)
    }

    /// Gets a service by id.
    #[instrument(skip(self))]
    pub async fn get_service(&self, id: i64) -> Result<Option<service::Model>, ServiceError> {
        let found = service::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(found)
    }

    /// Creates a new service, persisted as given.
    #[instrument(skip(self, payload))]
    pub async fn create_service(
        &self,
        payload: ServicePayload,
    ) -> Result<service::Model, ServiceError> {
        let created = service::ActiveModel {
            id: NotSet,
            name: Set(payload.name),
            duration: Set(payload.duration),
            price: Set(payload.price),
            description: Set(payload.description),
            is_active: Set(payload.is_active),
        }
        .insert(&*self.db)
        .await?;

        info!(service_id = created.id, "created catalog service");
        Ok(created)
    }

    /// Overwrites an existing service's fields.
    #[instrument(skip(self, payload))]
    pub async fn update_service(
        &self,
        id: i64,
        payload: ServicePayload,
    ) -> Result<service::Model, ServiceError> {
        let existing = service::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service not found with id: {}", id)))?;

        let mut active: service::ActiveModel = existing.into();
        active.name = Set(payload.name);
        active.duration = Set(payload.duration);
        active.price = Set(payload.price);
        active.description = Set(payload.description);
        active.is_active = Set(payload.is_active);

        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    /// Deletes a service. No cascade check: appointments and queue entries
    /// referencing it keep their id and resolve to null from then on.
    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: i64) -> Result<(), ServiceError> {
        service::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    /// Flips the active flag.
    #[instrument(skip(self))]
    pub async fn toggle_service_status(&self, id: i64) -> Result<service::Model, ServiceError> {
        let existing = service::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Service not found with id: {}", id)))?;

        let next = !existing.is_active;
        let mut active: service::ActiveModel = existing.into();
        active.is_active = Set(next);

        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }
}
