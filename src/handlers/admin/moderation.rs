use axum::{Extension, Json};
use serde::Deserialize;

use crate::database::{DatabaseManager, DonationRepository, RequestRepository};
use crate::error::ApiError;
use crate::handlers::{parse_record_id, stored_donation_status, stored_request_status};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::types::{DonationStatus, RequestStatus};
use crate::workflow::{self, Actor};

#[derive(Debug, Deserialize)]
pub struct UpdateRequestStatus {
    pub request_id: Option<String>,
    pub status: Option<String>,
}

/// POST /update_request_status - Approve, reject or complete a request
///
/// Admin-driven moves through the request state machine: pending requests
/// may be approved or rejected, approved requests completed. Terminal
/// states accept nothing; violations leave the record unmodified.
pub async fn update_request_status(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateRequestStatus>,
) -> ApiResult {
    let id = parse_record_id(payload.request_id.as_deref(), "request")?;
    let target = payload
        .status
        .as_deref()
        .and_then(RequestStatus::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let pool = DatabaseManager::pool().await?;
    let requests = RequestRepository::new(pool);

    let request = requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Request not found"))?;

    let current = stored_request_status(&request.status)?;
    workflow::request_transition(current, target, Actor::Admin, &request.receiver_email)?;

    requests.set_status(id, target).await?;
    tracing::info!("Request {} moved {} -> {} by {}", id, current, target, user.id);

    Ok(ApiResponse::message("Request status updated"))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDonationStatus {
    pub donation_id: Option<String>,
    pub status: Option<String>,
}

/// POST /update_donation_status - Move a listing through its lifecycle
///
/// Donation moves follow the explicit transition table; an arbitrary
/// admin-set status is rejected rather than written.
pub async fn update_donation_status(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateDonationStatus>,
) -> ApiResult {
    let id = parse_record_id(payload.donation_id.as_deref(), "donation")?;
    let target = payload
        .status
        .as_deref()
        .and_then(DonationStatus::parse)
        .ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let pool = DatabaseManager::pool().await?;
    let donations = DonationRepository::new(pool);

    let donation = donations
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Donation not found"))?;

    let current = stored_donation_status(&donation.status)?;
    workflow::donation_transition(current, target, Actor::Admin)?;

    donations.set_status(id, target).await?;
    tracing::info!("Donation {} moved {} -> {} by {}", id, current, target, user.id);

    Ok(ApiResponse::message("Donation status updated"))
}

#[derive(Debug, Deserialize)]
pub struct VerifyPrescription {
    pub request_id: Option<String>,
}

/// POST /verify_prescription - Mark a request's prescription as checked.
/// 400 when the request has no prescription on file.
pub async fn verify_prescription(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<VerifyPrescription>,
) -> ApiResult {
    let id = parse_record_id(payload.request_id.as_deref(), "request")?;

    let pool = DatabaseManager::pool().await?;
    let requests = RequestRepository::new(pool);

    let request = requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Request not found"))?;

    if request.prescription.is_none() {
        return Err(ApiError::bad_request("No prescription on file"));
    }

    requests.set_prescription_verified(id).await?;
    tracing::info!("Prescription on request {} verified by {}", id, user.id);

    Ok(ApiResponse::message("Prescription verified"))
}
