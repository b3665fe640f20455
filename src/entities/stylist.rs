use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Availability of a stylist, driven by the dashboard status buttons.
#[derive(
    Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, strum::Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum StylistStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "BUSY")]
    Busy,
    #[sea_orm(string_value = "OFF_DUTY")]
    OffDuty,
}

/// The `stylists` table.
///
/// The password hash never leaves the server: it is skipped on
/// serialization, so list and login responses carry only public fields.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stylists")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub mobile: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub status: StylistStatus,
    pub image_url: Option<String>,
    pub specialty: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
