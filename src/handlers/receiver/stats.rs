use axum::Extension;
use serde_json::json;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::stats_service;

/// GET /get_receiver_stats - The caller's request counts by status.
/// Degrades to zero-fill on read errors.
pub async fn get_receiver_stats(Extension(user): Extension<CurrentUser>) -> ApiResult {
    let stats = stats_service::receiver_stats(&user.email).await;
    Ok(ApiResponse::with_data(
        "Receiver statistics",
        json!({ "stats": stats }),
    ))
}
