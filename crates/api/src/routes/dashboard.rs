//! Employee dashboard.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use shipdesk_common::error::AppError;
use shipdesk_common::types::{Employee, ShippingRequest};
use shipdesk_engine::employee::EmployeeService;
use shipdesk_engine::request::RequestService;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub employee: Employee,
    pub requests: Vec<ShippingRequest>,
}

/// GET /api/dashboard: The logged-in employee and their requests, newest first.
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    // The account may have been removed after the token was issued.
    let employee = match EmployeeService::get(&state.pool, auth.employee_id).await {
        Ok(employee) => employee,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Auth(
                "Session expired. Please log in again".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    let requests = RequestService::list_by_employee(&state.pool, employee.id).await?;

    Ok(Json(DashboardResponse { employee, requests }))
}
