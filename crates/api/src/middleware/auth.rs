//! Session authentication.
//!
//! Employees log in once and receive a signed JWT, stored in the `session`
//! cookie and also returned in the login response. The `AuthUser` extractor
//! accepts either the cookie or an `Authorization: Bearer <token>` header.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shipdesk_common::error::AppError;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// JWT claims stored in the token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the employee's UUID
    pub sub: String,
    /// Username at login time
    pub username: String,
    /// Expiration time (UNIX timestamp)
    pub exp: i64,
    /// Issued at (UNIX timestamp)
    pub iat: i64,
}

/// Logged-in employee extracted from the session token.
///
/// Use `Option<AuthUser>` on routes where login is optional.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub employee_id: Uuid,
    pub claims: Claims,
}

/// Encode a session token for an employee.
pub fn encode_jwt(
    employee_id: Uuid,
    username: &str,
    secret: &str,
    expiry_hours: u64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiry_hours as i64);

    let claims = Claims {
        sub: employee_id.to_string(),
        username: username.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Auth(format!("Failed to encode JWT: {}", e)))
}

/// Decode and validate a session token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

/// Session cookie carrying `token`.
pub fn session_cookie(token: String, expiry_hours: u64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(expiry_hours as i64))
        .build()
}

/// Expired session cookie, used to log out.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(0))
        .build()
}

fn bearer_or_cookie(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn authenticate(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let claims = decode_jwt(token, secret)?;
    let employee_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Auth("Invalid employee ID in token".to_string()))?;
    Ok(AuthUser {
        employee_id,
        claims,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_or_cookie(parts);
        let secret = state.config.jwt_secret.clone();

        async move {
            let token = token.ok_or_else(|| {
                AppError::Auth("Please log in to access this page".to_string())
            })?;
            authenticate(&token, &secret)
        }
    }
}

/// Anonymous when no token is sent or the token does not verify.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let token = bearer_or_cookie(parts);
        let secret = state.config.jwt_secret.clone();

        async move {
            let Some(token) = token else {
                return Ok(None);
            };
            match authenticate(&token, &secret) {
                Ok(user) => Ok(Some(user)),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring invalid session token");
                    Ok(None)
                }
            }
        }
    }
}
