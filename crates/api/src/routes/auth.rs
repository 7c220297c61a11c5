//! Employee registration, login and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shipdesk_common::error::AppError;
use shipdesk_common::types::Employee;
use shipdesk_engine::employee::{EmployeeService, RegisterEmployeeParams};

use crate::middleware::auth::{cleared_session_cookie, encode_jwt, session_cookie};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee_id: Uuid,
    pub username: String,
}

/// POST /api/auth/register: Create an employee account.
async fn register(
    State(state): State<AppState>,
    Json(params): Json<RegisterEmployeeParams>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = EmployeeService::register(&state.pool, &params).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// POST /api/auth/login: Verify credentials and start a session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let employee = EmployeeService::authenticate(&state.pool, &req.username, &req.password).await?;

    let token = encode_jwt(
        employee.id,
        &employee.username,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    let jar = jar.add(session_cookie(token.clone(), state.config.jwt_expiry_hours));

    Ok((
        jar,
        Json(LoginResponse {
            token,
            employee_id: employee.id,
            username: employee.username,
        }),
    ))
}

/// POST /api/auth/logout: Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.add(cleared_session_cookie()), StatusCode::NO_CONTENT)
}
