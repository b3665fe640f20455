use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::clock::Clock;
use crate::db::DbPool;
use crate::entities::queue_entry::{self, QueueStatus, QueueType};
use crate::entities::service;
use crate::errors::ServiceError;

/// Linear wait heuristic: each customer already waiting adds this many
/// minutes to a new joiner's estimate.
const WAIT_MINUTES_PER_CUSTOMER: i32 = 30;

/// Estimate for a joiner with `waiting_ahead` customers in front of them.
/// Advisory only; concurrent joins may read the same count and receive
/// identical estimates.
fn estimated_wait_minutes(waiting_ahead: u64) -> i32 {
    waiting_ahead as i32 * WAIT_MINUTES_PER_CUSTOMER
}

/// Payload for joining the walk-in queue.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinQueuePayload {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,
    #[serde(rename = "type", default)]
    pub entry_type: QueueType,
    pub service_id: Option<i64>,
}

/// A queue entry joined with the service it references, if any.
#[derive(Debug, Clone, Serialize)]
pub struct QueueEntryWithService {
    #[serde(flatten)]
    pub entry: queue_entry::Model,
    pub service: Option<service::Model>,
}

impl From<(queue_entry::Model, Option<service::Model>)> for QueueEntryWithService {
    fn from((entry, service): (queue_entry::Model, Option<service::Model>)) -> Self {
        Self { entry, service }
    }
}

/// Manager for the walk-in queue: join, advance, complete.
#[derive(Clone)]
pub struct QueueService {
    db: Arc<DbPool>,
    clock: Arc<dyn Clock>,
}

impl QueueService {
    pub fn new(db: Arc<DbPool>, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Lists every queue entry regardless of status.
    #[instrument(skip(self))]
    pub async fn list_entries(&self) -> Result<Vec<QueueEntryWithService>, ServiceError> {
        let rows = queue_entry::Entity::find()
            .find_also_related(service::Entity)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// WAITING entries in FIFO presentation order (joined_at ascending) —
    /// the only ordering guarantee the queue makes.
    #[instrument(skip(self))]
    pub async fn waiting_queue(&self) -> Result<Vec<QueueEntryWithService>, ServiceError> {
        let rows = queue_entry::Entity::find()
            .find_also_related(service::Entity)
            .filter(queue_entry::Column::Status.eq(QueueStatus::Waiting))
            .order_by_asc(queue_entry::Column::JoinedAt)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Gets a queue entry by id.
    #[instrument(skip(self))]
    pub async fn get_entry(&self, id: i64) -> Result<Option<QueueEntryWithService>, ServiceError> {
        let row = queue_entry::Entity::find_by_id(id)
            .find_also_related(service::Entity)
            .one(&*self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Number of entries currently WAITING.
    #[instrument(skip(self))]
    pub async fn waiting_count(&self) -> Result<u64, ServiceError> {
        let count = queue_entry::Entity::find()
            .filter(queue_entry::Column::Status.eq(QueueStatus::Waiting))
            .count(&*self.db)
            .await?;
        Ok(count)
    }

    /// Adds a customer to the queue: joined_at and WAITING are forced, a
    /// supplied service id must resolve, and the wait estimate is computed
    /// from the WAITING count before this entry is inserted.
    #[instrument(skip(self, payload))]
    pub async fn join_queue(
        &self,
        payload: JoinQueuePayload,
    ) -> Result<QueueEntryWithService, ServiceError> {
        let service = match payload.service_id {
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

        let waiting_ahead = self.waiting_count().await?;
        let estimate = estimated_wait_minutes(waiting_ahead);

        let created = queue_entry::ActiveModel {
            id: NotSet,
            customer_name: Set(payload.customer_name),
            mobile: Set(payload.mobile),
            entry_type: Set(payload.entry_type),
            status: Set(QueueStatus::Waiting),
            joined_at: Set(self.clock.now()),
            started_at: Set(None),
            completed_at: Set(None),
            estimated_wait_time: Set(estimate),
            service_id: Set(service.as_ref().map(|s| s.id)),
        }
        .insert(&*self.db)
        .await?;

        info!(
            entry_id = created.id,
            estimated_wait_time = estimate,
            "customer joined queue"
        );
        Ok((created, service).into())
    }

    /// Sets an entry's status. IN_PROGRESS stamps started_at; COMPLETED or
    /// CANCELLED stamps completed_at. Re-entering a status re-stamps its
    /// timestamp with the current time.
    #[instrument(skip(self))]
    pub async fn update_queue_status(
        &self,
        id: i64,
        status: QueueStatus,
    ) -> Result<QueueEntryWithService, ServiceError> {
        let row = queue_entry::Entity::find_by_id(id)
            .find_also_related(service::Entity)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Queue entry not found with id: {}", id))
            })?;
        let (existing, service) = row;

        let mut active: queue_entry::ActiveModel = existing.into();
        active.status = Set(status.clone());
        match status {
            QueueStatus::InProgress => {
                active.started_at = Set(Some(self.clock.now()));
            }
            QueueStatus::Completed | QueueStatus::Cancelled => {
                active.completed_at = Set(Some(self.clock.now()));
            }
            QueueStatus::Waiting => {}
        }

        let updated = active.update(&*self.db).await?;
        Ok((updated, service).into())
    }

    /// Convenience: call the next customer (status to IN_PROGRESS).
    #[instrument(skip(self))]
    pub async fn move_to_next(&self, id: i64) -> Result<QueueEntryWithService, ServiceError> {
        self.update_queue_status(id, QueueStatus::InProgress).await
    }

    /// Convenience: finish a customer's service (status to COMPLETED).
    #[instrument(skip(self))]
    pub async fn complete_service(&self, id: i64) -> Result<QueueEntryWithService, ServiceError> {
        self.update_queue_status(id, QueueStatus::Completed).await
    }

    /// Entries that joined today, between 00:00:00 and 23:59:59 inclusive.
    /// Second granularity at the boundaries: an entry at 23:59:59.500 falls
    /// outside the window.
    #[instrument(skip(self))]
    pub async fn today_queue(&self) -> Result<Vec<QueueEntryWithService>, ServiceError> {
        let today = self.clock.today();
        let start_of_day = today
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ServiceError::InternalError("invalid start of day".to_string()))?;
        let end_of_day = today
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ServiceError::InternalError("invalid end of day".to_string()))?;

        let rows = queue_entry::Entity::find()
            .find_also_related(service::Entity)
            .filter(queue_entry::Column::JoinedAt.between(start_of_day, end_of_day))
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deletes a queue entry by id.
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: i64) -> Result<(), ServiceError> {
        queue_entry::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 30)]
    #[case(3, 90)]
    #[case(10, 300)]
    fn wait_estimate_is_linear_in_queue_length(#[case] waiting: u64, #[case] expected: i32) {
        assert_eq!(estimated_wait_minutes(waiting), expected);
    }
}
