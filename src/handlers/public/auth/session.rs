use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth;
use crate::database::{AccountRepository, DatabaseManager, SessionRepository};
use crate::error::ApiError;
use crate::middleware::{
    build_session_cookie, clear_session_cookie, session_token_from_headers, ApiResponse,
};
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /login - Authenticate and establish a server-side session
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "user_type": "donor"
/// }
/// ```
///
/// The account tables are searched in fixed priority order donor, receiver,
/// admin; an email duplicated across roles resolves to the earliest match.
/// 404 when no table holds the email, 401 when the password hash does not
/// verify. Success sets the session cookie.
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Response, ApiError> {
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email and password required"))?;
    let password = payload
        .password
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email and password required"))?;

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());

    let mut found = None;
    for role in Role::LOGIN_ORDER {
        if let Some(account) = accounts.find_by_email(role, email).await? {
            found = Some((role, account));
            break;
        }
    }
    let (role, account) = found.ok_or_else(|| ApiError::not_found("User not found"))?;

    if !auth::verify_password(password, &account.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::generate_session_token();
    SessionRepository::new(pool)
        .create(&token, &account, role)
        .await?;

    tracing::info!("{} {} logged in", role, account.id);

    let mut response =
        ApiResponse::with_data("Login successful", json!({ "user_type": role.as_str() }))
            .into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie_header(&build_session_cookie(&token))?);
    Ok(response)
}

/// GET /logout - Drop the server-side session and clear the cookie
///
/// Clearing the cookie succeeds even when the session row cannot be
/// deleted; the orphaned row expires on its own.
pub async fn logout(headers: HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = session_token_from_headers(&headers) {
        match DatabaseManager::pool().await {
            Ok(pool) => {
                if let Err(e) = SessionRepository::new(pool).delete(&token).await {
                    tracing::warn!("Failed to delete session at logout: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to delete session at logout: {}", e),
        }
    }

    let mut response = ApiResponse::message("Logged out").into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie_header(&clear_session_cookie())?);
    Ok(response)
}

fn cookie_header(cookie: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(cookie).map_err(|e| {
        tracing::error!("Failed to encode session cookie: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}
