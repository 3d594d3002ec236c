use axum::extract::Multipart;
use axum::Extension;
use serde_json::json;

use crate::database::{AccountRepository, DatabaseManager, SessionRepository};
use crate::error::ApiError;
use crate::handlers::form::FormData;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::upload_service::{self, UploadKind};

/// POST /upload_profile - Replace the caller's profile image
///
/// Multipart body with one image file (png/jpg/jpeg/gif). The new file is
/// written before the database update; the replaced file is deleted
/// best-effort afterwards.
pub async fn upload_profile(
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult {
    let data = FormData::parse(multipart).await?;
    let upload = data
        .file()
        .ok_or_else(|| ApiError::bad_request("Profile image file required"))?;

    let stored = upload_service::store(
        UploadKind::Image,
        user.role.upload_dir(),
        user.id,
        &upload.original_name,
        &upload.bytes,
    )
    .await?;

    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());

    let previous = accounts
        .find_by_id(user.role, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?
        .profile_image;

    accounts
        .set_profile_image(user.role, user.id, Some(&stored))
        .await?;
    SessionRepository::new(pool)
        .update_profile_image(user.id, Some(&stored))
        .await?;

    upload_service::remove_previous(user.role.upload_dir(), previous.as_deref()).await;

    Ok(ApiResponse::with_data(
        "Profile image updated",
        json!({ "profile_image": stored }),
    ))
}

/// POST /delete_profile_image - Clear the caller's profile image
pub async fn delete_profile_image(Extension(user): Extension<CurrentUser>) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());

    let previous = accounts
        .find_by_id(user.role, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?
        .profile_image;

    accounts.set_profile_image(user.role, user.id, None).await?;
    SessionRepository::new(pool)
        .update_profile_image(user.id, None)
        .await?;

    upload_service::remove_previous(user.role.upload_dir(), previous.as_deref()).await;

    Ok(ApiResponse::message("Profile image removed"))
}
