use axum::Extension;
use serde_json::json;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::stats_service;

/// GET /get_admin_stats - Marketplace-wide totals, including today's
/// registrations bounded by the UTC midnight cutoff. Degrades to zero-fill
/// on read errors.
pub async fn get_admin_stats(Extension(_user): Extension<CurrentUser>) -> ApiResult {
    let stats = stats_service::admin_stats().await;
    Ok(ApiResponse::with_data(
        "Admin statistics",
        json!({ "stats": stats }),
    ))
}
