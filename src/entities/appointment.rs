use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle of an appointment. Any transition is permitted; the workflow
/// deliberately does not constrain status changes.
#[derive(
    Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// The `appointments` table.
///
/// `created_at` is stamped once at creation; `updated_at` is refreshed on
/// every mutation. Both are stamped explicitly by the manager, not by
/// persistence hooks.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_name: String,
    pub mobile: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub service_id: i64,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_canonical_strings() {
        for (status, expected) in [
            (AppointmentStatus::Pending, "PENDING"),
            (AppointmentStatus::Confirmed, "CONFIRMED"),
            (AppointmentStatus::InProgress, "IN_PROGRESS"),
            (AppointmentStatus::Completed, "COMPLETED"),
            (AppointmentStatus::Cancelled, "CANCELLED"),
        ] {
            let json = serde_json::to_value(&status).unwrap();
            assert_eq!(json, serde_json::json!(expected));
            assert_eq!(
                serde_json::from_value::<AppointmentStatus>(json).unwrap(),
                status
            );
        }
    }
}
