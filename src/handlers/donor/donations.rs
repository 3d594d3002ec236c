use axum::extract::Multipart;
use axum::Extension;
use chrono::{NaiveDate, Utc};
use serde_json::json;

use crate::api::format::donation_to_api_value;
use crate::database::models::NewDonation;
use crate::database::{DatabaseManager, DonationRepository};
use crate::error::ApiError;
use crate::handlers::form::FormData;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::upload_service::{self, UploadKind};

/// POST /submit_donation - List a medicine for donation
///
/// Multipart body: medicine_name, expiry_date (YYYY-MM-DD) and quantity are
/// required; manufacturer, category, condition and description are optional,
/// as is an image file. New listings start as `available`.
pub async fn submit_donation(
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> ApiResult {
    let data = FormData::parse(multipart).await?;

    let medicine_name = data.require("medicine_name")?.to_string();
    let expiry_date: NaiveDate = NaiveDate::parse_from_str(data.require("expiry_date")?, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("expiry_date must be YYYY-MM-DD"))?;
    let quantity = data.require_quantity("quantity")?;

    // The image is written before the row insert. A crash in between leaves
    // an orphaned file, never a row pointing at nothing.
    let image = match data.file() {
        Some(upload) => Some(
            upload_service::store(
                UploadKind::Image,
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
    let donation = DonationRepository::new(pool)
        .insert(NewDonation {
            owner_email: user.email.clone(),
            medicine_name,
            manufacturer: data.text("manufacturer").map(str::to_string),
            expiry_date,
            quantity,
            category: data.text("category").map(str::to_string),
            condition: data.text("condition").map(str::to_string),
            description: data.text("description").map(str::to_string),
            image,
        })
        .await?;

    tracing::info!("Donation {} listed by {}", donation.id, user.id);

    Ok(ApiResponse::with_data(
        "Donation submitted",
        json!({ "donation_id": donation.id }),
    ))
}

/// GET /my_donations - The caller's listings, newest first
pub async fn my_donations(Extension(user): Extension<CurrentUser>) -> ApiResult {
    let pool = DatabaseManager::pool().await?;
    let donations = DonationRepository::new(pool)
        .list_by_owner(&user.email)
        .await?;

    let now = Utc::now();
    let rows: Vec<_> = donations
        .iter()
        .map(|donation| donation_to_api_value(donation, now))
        .collect();

    Ok(ApiResponse::with_data(
        "Donations retrieved",
        json!({ "donations": rows }),
    ))
}
