//! Idempotent bootstrap seeding.
//!
//! Invoked once at process start when `seed_on_start` is set. Each table is
//! seeded only when empty, so restarting against an existing store is a
//! no-op.

use std::sync::Arc;

use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::db::DbPool;
use crate::entities::{service, stylist::StylistStatus};
use crate::errors::ServiceError;
use crate::services::stylists::{NewStylist, StylistService};

pub async fn run(db: &Arc<DbPool>) -> Result<(), ServiceError> {
    seed_services(db).await?;
    seed_stylists(db).await?;
    Ok(())
}

async fn seed_services(db: &Arc<DbPool>) -> Result<(), ServiceError> {
    if service::Entity::find().count(&**db).await? > 0 {
        return Ok(());
    }

    info!("Seeding initial services");

    let services = [
        (
            "Haircut & Styling",
            "45 mins",
            dec!(45.00),
            "Professional haircut with styling",
        ),
        ("Beard Trim", "30 mins", dec!(25.00), "Beard shaping and trim"),
        (
            "Full Color",
            "2 hrs",
            dec!(120.00),
            "Complete hair coloring service",
        ),
        (
            "Facial Treatment",
            "60 mins",
            dec!(80.00),
            "Relaxing facial treatment",
        ),
    ];

    for (name, duration, price, description) in services {
        service::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            duration: Set(duration.to_string()),
            price: Set(price),
            description: Set(Some(description.to_string())),
            is_active: Set(true),
        }
        .insert(&**db)
        .await?;
    }

    info!("Services seeded");
    Ok(())
}

async fn seed_stylists(db: &Arc<DbPool>) -> Result<(), ServiceError> {
    use crate::entities::stylist;

    if stylist::Entity::find().count(&**db).await? > 0 {
        return Ok(());
    }

    info!("Seeding initial stylists");

    let stylists = StylistService::new(db.clone());
    let seeded = [
        (
            "Sarah Jenkins",
            "9876543210",
            StylistStatus::Available,
            "https://images.unsplash.com/photo-1595959183082-7bce70848679?auto=format&fit=crop&q=80&w=800",
            "Color Specialist",
        ),
        (
            "David Chen",
            "9876543211",
            StylistStatus::Busy,
            "https://images.unsplash.com/photo-1605497788044-5a32c7078486?auto=format&fit=crop&q=80&w=800",
            "Precision Cuts",
        ),
        (
            "Elena Rodriguez",
            "9876543212",
            StylistStatus::Available,
            "https://images.unsplash.com/photo-1580618672591-eb180b1a973f?auto=format&fit=crop&q=80&w=800",
            "Bridal & Events",
        ),
    ];

    for (name, mobile, status, image_url, specialty) in seeded {
        stylists
            .create_stylist(NewStylist {
                name: name.to_string(),
                mobile: mobile.to_string(),
                password: "password123".to_string(),
                status,
                image_url: Some(image_url.to_string()),
                specialty: Some(specialty.to_string()),
            })
            .await?;
    }

    info!("Stylists seeded");
    Ok(())
}
