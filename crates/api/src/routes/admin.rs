//! Telegram diagnostics for logged-in employees.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use shipdesk_common::types::{DeliveryType, RequestRecord};
use shipdesk_notifier::DispatchResult;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/telegram/test-connection",
            post(test_connection),
        )
        .route(
            "/api/admin/telegram/test-notification",
            post(test_notification),
        )
}

/// POST /api/admin/telegram/test-connection: Check the bot credentials.
async fn test_connection(State(state): State<AppState>, auth: AuthUser) -> Json<DispatchResult> {
    tracing::info!(employee_id = %auth.employee_id, "Telegram connection test requested");
    Json(state.notifier.test_connection().await)
}

/// POST /api/admin/telegram/test-notification: Send the sample request to the chat.
async fn test_notification(State(state): State<AppState>, auth: AuthUser) -> Json<DispatchResult> {
    tracing::info!(employee_id = %auth.employee_id, "Telegram test notification requested");
    let record = RequestRecord::sample(Utc::now());
    Json(
        state
            .notifier
            .send(&record, DeliveryType::Astana.as_str())
            .await,
    )
}
