use axum::Extension;
use serde_json::json;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

/// GET /donor/dashboard, /receiver/dashboard, /admin/dashboard
///
/// The role guard on each route group has already enforced the matching
/// session role; the handler just echoes the session identity.
pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> ApiResult {
    Ok(ApiResponse::with_data(
        "Dashboard",
        json!({
            "user": {
                "id": user.id,
                "username": user.username,
                "email": user.email,
                "user_type": user.role.as_str(),
                "profile_image": user.profile_image,
            }
        }),
    ))
}
