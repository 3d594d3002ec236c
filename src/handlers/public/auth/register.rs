use axum::Json;
use serde::Deserialize;

use crate::auth;
use crate::database::models::NewAccount;
use crate::database::{AccountRepository, DatabaseManager};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

/// POST /registration - Create a new account in the target role's table
///
/// Expected Input:
/// ```json
/// {
///   "username": "string",
///   "email": "string",
///   "password": "string",
///   "user_type": "donor|receiver|admin"
/// }
/// ```
///
/// Responds 400 on missing fields or an unknown role, 409 when the email is
/// already registered for that role. The password is stored as a salted
/// bcrypt hash.
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult {
    let username = required(&payload.username)?;
    let email = required(&payload.email)?;
    let password = required(&payload.password)?;
    let user_type = required(&payload.user_type)?;

    let role =
        Role::parse(user_type).ok_or_else(|| ApiError::bad_request("Invalid user type"))?;

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool);

    // Duplicate registrations are rejected, never merged
    if accounts.find_by_email(role, email).await?.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = auth::hash_password(password)?;
    let account = accounts
        .insert(
            role,
            NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            },
        )
        .await?;

    tracing::info!("Registered {} account {}", role, account.id);

    let role_name = match role {
        Role::Donor => "Donor",
        Role::Receiver => "Receiver",
        Role::Admin => "Admin",
    };
    Ok(ApiResponse::message(format!(
        "{} registered successfully",
        role_name
    )))
}

fn required(field: &Option<String>) -> Result<&str, ApiError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("All fields required"))
}
