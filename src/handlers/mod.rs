pub mod appointments;
pub mod health;
pub mod queue;
pub mod services;
pub mod stylists;

use axum::Router;

use crate::AppState;

/// The full `/api` surface, one resource group per manager.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/services", services::routes())
        .nest("/stylists", stylists::routes())
        .nest("/appointments", appointments::routes())
        .nest("/queue", queue::routes())
}
