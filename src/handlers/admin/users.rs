use axum::extract::Query;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::api::format::account_to_api_value;
use crate::database::{AccountRepository, DatabaseManager};
use crate::error::ApiError;
use crate::handlers::parse_record_id;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::types::{AccountStatus, Role};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub user_type: Option<String>,
}

/// GET /admin/users?user_type=donor - Accounts of one role, newest first
pub async fn list_users(
    Extension(_user): Extension<CurrentUser>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult {
    let role = query
        .user_type
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid user type"))?;

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool).list(role).await?;

    let now = Utc::now();
    let rows: Vec<_> = accounts
        .iter()
        .map(|account| account_to_api_value(account, now))
        .collect();

    Ok(ApiResponse::with_data(
        "Users retrieved",
        json!({ "users": rows }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserStatus {
    pub user_type: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<String>,
}

/// POST /update_user_status - Set an account to active, suspended or blocked
pub async fn update_user_status(
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<UpdateUserStatus>,
) -> ApiResult {
    let role = payload
        .user_type
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid user type"))?;
    let id = parse_record_id(payload.user_id.as_deref(), "user")?;
    let status = payload
        .status
        .as_deref()
        .and_then(AccountStatus::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let pool = DatabaseManager::pool().await?;
    let updated = AccountRepository::new(pool).set_status(role, id, status).await?;
    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!("{} {} set to {} by {}", role, id, status, admin.id);
    Ok(ApiResponse::message("User status updated"))
}

#[derive(Debug, Deserialize)]
pub struct VerifyUser {
    pub user_type: Option<String>,
    pub user_id: Option<String>,
}

/// POST /verify_user - Mark an account as verified
pub async fn verify_user(
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<VerifyUser>,
) -> ApiResult {
    let role = payload
        .user_type
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid user type"))?;
    let id = parse_record_id(payload.user_id.as_deref(), "user")?;

    let pool = DatabaseManager::pool().await?;
    let updated = AccountRepository::new(pool).set_verified(role, id).await?;
    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!("{} {} verified by {}", role, id, admin.id);
    Ok(ApiResponse::message("User verified"))
}
