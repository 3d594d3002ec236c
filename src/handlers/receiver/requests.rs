use axum::extract::Multipart;
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::api::format::{donation_to_api_value, request_to_api_value};
use crate::database::models::NewMedicineRequest;
use crate::database::{DatabaseManager, DonationRepository, RequestRepository};
use crate::error::ApiError;
use crate::handlers::form::FormData;
use crate::handlers::{parse_record_id, stored_request_status};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::upload_service::{self, UploadKind};
use crate::types::{RequestStatus, Urgency};
use crate::workflow::{self, Actor};

/// POST /request_medicine - Submit a request against the donation pool
///
/// Multipart body: medicine_name and quantity are required; dosage, urgency
/// (low/normal/urgent/immediate, default normal), preferred_location,
/// condition_preference and notes are optional, as is a prescription file
/// (images or pdf). New requests start as `pending` and unverified.
pub async fn request_medicine(
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult {
    let data = FormData::parse(multipart).await?;

    let medicine_name = data.require("medicine_name")?.to_string();
    let quantity = data.require_quantity("quantity")?;
    let urgency = match data.text("urgency") {
        Some(raw) => Urgency::parse(raw).ok_or_else(|| ApiError::bad_request("Invalid urgency"))?,
        None => Urgency::Normal,
    };

    let prescription = match data.file() {
        Some(upload) => Some(
            upload_service::store(
                UploadKind::Prescription,
                user.role.upload_dir(),
                user.id,
                &upload.original_name,
                &upload.bytes,
            )
            .await?,
        ),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let request = RequestRepository::new(pool)
        .insert(NewMedicineRequest {
            receiver_email: user.email.clone(),
            medicine_name,
            dosage: data.text("dosage").map(str::to_string),
            quantity,
            urgency: urgency.as_str().to_string(),
            preferred_location: data.text("preferred_location").map(str::to_string),
            condition_preference: data.text("condition_preference").map(str::to_string),
            notes: data.text("notes").map(str::to_string),
            prescription,
        })
        .await?;

    tracing::info!("Request {} submitted by {}", request.id, user.id);

    Ok(ApiResponse::with_data(
        "Request submitted",
        json!({ "request_id": request.id }),
    ))
}

/// GET /available_medicines - Listings still in the pool
pub async fn available_medicines(Extension(_user): Extension<CurrentUser>) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    let donations = DonationRepository::new(pool).list_available().await?;

    let now = Utc::now();
    let rows: Vec<_> = donations
        .iter()
        .map(|donation| donation_to_api_value(donation, now))
        .collect();

    Ok(ApiResponse::with_data(
        "Available medicines",
        json!({ "medicines": rows }),
    ))
}

/// GET /my_requests - The caller's requests, newest first
pub async fn my_requests(Extension(user): Extension<CurrentUser>) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    let requests = RequestRepository::new(pool)
        .list_by_receiver(&user.email)
        .await?;

    let now = Utc::now();
    let rows: Vec<_> = requests
        .iter()
        .map(|request| request_to_api_value(request, now))
        .collect();

    Ok(ApiResponse::with_data(
        "Requests retrieved",
        json!({ "requests": rows }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub request_id: Option<String>,
}

/// POST /cancel_request - Cancel one of the caller's pending requests
///
/// Only the owning receiver may cancel, and only while the request is still
/// pending. A second attempt fails: cancelled is terminal.
pub async fn cancel_request(
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CancelRequest>,
) -> ApiResult {
    let id = parse_record_id(payload.request_id.as_deref(), "request")?;

    let pool = DatabaseManager::pool().await?;
    let requests = RequestRepository::new(pool);

    let request = requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Request not found"))?;

    let current = stored_request_status(&request.status)?;
    workflow::request_transition(
        current,
        RequestStatus::Cancelled,
        Actor::Receiver { email: &user.email },
        &request.receiver_email,
    )?;

    requests.set_status(id, RequestStatus::Cancelled).await?;
    tracing::info!("Request {} cancelled by {}", id, user.id);

    Ok(ApiResponse::message("Request cancelled"))
}
