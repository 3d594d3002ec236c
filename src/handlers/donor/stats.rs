use axum::Extension;
use serde_json::json;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::stats_service;

/// GET /get_donor_stats - The caller's donation counts by lifecycle bucket.
/// Read errors degrade to a zero-filled object; the dashboard is
/// best-effort by contract.
pub async fn get_donor_stats(Extension(user): Extension<CurrentUser>) -> ApiResult {
    let stats = stats_service::donor_stats(&user.email).await;
    Ok(ApiResponse::with_data(
        "Donor statistics",
        json!({ "stats": stats }),
    ))
}
