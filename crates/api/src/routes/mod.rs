pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod requests;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(requests::router())
        .merge(admin::router())
        .with_state(state)
}
