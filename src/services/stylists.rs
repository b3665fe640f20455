use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::auth;
use crate::db::DbPool;
use crate::entities::stylist::{self, StylistStatus};
use crate::errors::ServiceError;

/// Credentials for a stylist login. Stateless: a successful login returns
/// the stylist record and nothing else — no session, no token.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub password: String,
}

/// Input for registering a stylist. There is no public route for this;
/// it is used by the bootstrap seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStylist {
    pub name: String,
    pub mobile: String,
    pub password: String,
    pub status: StylistStatus,
    pub image_url: Option<String>,
    pub specialty: Option<String>,
}

/// Manager for the stylist directory.
#[derive(Clone)]
pub struct StylistService {
    db: Arc<DbPool>,
}

impl StylistService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Lists every stylist.
    #[instrument(skip(self))]
    pub async fn list_stylists(&self) -> Result<Vec<stylist::Model>, ServiceError> {
        let stylists = stylist::Entity::find().all(&*self.db).await?;
        Ok(stylists)
    }

    /// Checks credentials against the stored hash. Returns the stylist on a
    /// match, `None` otherwise — an unknown mobile and a wrong password are
    /// indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        mobile: &str,
        password: &str,
    ) -> Result<Option<stylist::Model>, ServiceError> {
        let stylist = stylist::Entity::find()
            .filter(stylist::Column::Mobile.eq(mobile))
            .one(&*self.db)
            .await?;

        match stylist {
            Some(stylist) if auth::verify_password(password, &stylist.password_hash) => {
                info!(stylist_id = stylist.id, "stylist logged in");
                Ok(Some(stylist))
            }
            _ => {
                warn!(mobile, "stylist login rejected");
                Ok(None)
            }
        }
    }

    /// Updates a stylist's availability status.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: i64,
        status: StylistStatus,
    ) -> Result<stylist::Model, ServiceError> {
        let existing = stylist::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Stylist not found with id: {}", id)))?;

        let mut active: stylist::ActiveModel = existing.into();
        active.status = Set(status);

        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    /// Registers a stylist, hashing the password before storage.
    #[instrument(skip(self, input))]
    pub async fn create_stylist(&self, input: NewStylist) -> Result<stylist::Model, ServiceError> {
        let password_hash = auth::hash_password(&input.password)?;

        let created = stylist::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            mobile: Set(input.mobile),
            password_hash: Set(password_hash),
            status: Set(input.status),
            image_url: Set(input.image_url),
            specialty: Set(input.specialty),
        }
        .insert(&*self.db)
        .await?;

        info!(stylist_id = created.id, "registered stylist");
        Ok(created)
    }
}
