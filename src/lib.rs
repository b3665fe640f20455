//! Salon API Library
//!
//! This crate provides the core functionality for the salon management API:
//! the service catalog, the stylist directory, appointment booking, and the
//! walk-in queue.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod seed;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::clock::Clock;
use crate::services::{
    appointments::AppointmentService, catalog::CatalogService, queue::QueueService,
    stylists::StylistService,
};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub catalog: CatalogService,
    pub stylists: StylistService,
    pub appointments: AppointmentService,
    pub queue: QueueService,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, config: config::AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: CatalogService::new(db.clone()),
            stylists: StylistService::new(db.clone()),
            appointments: AppointmentService::new(db.clone(), clock.clone()),
            queue: QueueService::new(db.clone(), clock),
            db,
            config,
        }
    }
}

/// Build the application router: health probe plus the full `/api` surface.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", handlers::api_routes())
        .with_state(state)
}
