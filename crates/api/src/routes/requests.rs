//! Shipping request routes: submission, tracking and status changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use shipdesk_common::error::AppError;
use shipdesk_common::types::{RequestStatus, ShippingRequest};
use shipdesk_engine::request::{CreateRequestParams, RequestService};
use shipdesk_notifier::TelegramNotifier;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/requests", post(submit_request))
        .route("/api/requests/track", get(track_requests))
        .route("/api/requests/{id}/status", patch(update_status))
        .route("/api/request-statuses", get(list_statuses))
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub id: i64,
    pub message: String,
    pub request: ShippingRequest,
}

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusEntry {
    pub status: RequestStatus,
    pub name: &'static str,
}

/// POST /api/requests: Submit a shipping request.
///
/// Public. When the caller is a logged-in employee the request is assigned to
/// them. The Telegram notification is best effort: its outcome is logged and
/// never changes the response.
async fn submit_request(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Json(params): Json<CreateRequestParams>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let employee_id = auth.map(|a| a.employee_id);
    let request = RequestService::create(&state.pool, &params, employee_id).await?;

    notify_new_request(&state.notifier, &request).await;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            id: request.id,
            message: format!("Request #{} submitted successfully", request.id),
            request,
        }),
    ))
}

/// Send the new-request notification, logging a warning on failure.
pub async fn notify_new_request(notifier: &TelegramNotifier, request: &ShippingRequest) {
    let record = request.to_record();
    let result = notifier
        .send(&record, request.delivery_type.as_str())
        .await;

    if !result.ok {
        tracing::warn!(
            request_id = request.id,
            detail = %result.detail,
            "Telegram notification failed"
        );
    }
}

/// GET /api/requests/track?phone=: Requests placed with a customer phone.
async fn track_requests(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<Vec<ShippingRequest>>, AppError> {
    let requests = RequestService::track_by_phone(&state.pool, &query.phone).await?;
    Ok(Json(requests))
}

/// PATCH /api/requests/{id}/status: Change the status of one of your requests.
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<ShippingRequest>, AppError> {
    let request =
        RequestService::update_status(&state.pool, id, auth.employee_id, &body.status).await?;
    Ok(Json(request))
}

/// GET /api/request-statuses: Status values with their display names.
async fn list_statuses() -> Json<Vec<StatusEntry>> {
    Json(
        RequestStatus::ALL
            .into_iter()
            .map(|status| StatusEntry {
                status,
                name: status.display_name(),
            })
            .collect(),
    )
}
