//! Listing wire formats.
//!
//! Every listing endpoint shapes rows here so the age strings and field
//! names stay consistent across dashboards.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::database::models::{Account, Donation, MedicineRequest};

/// Render an elapsed duration as a coarse "time ago" string. Shared by all
/// listing endpoints.
pub fn humanize(duration: Duration) -> String {
    let seconds = duration.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = duration.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = duration.num_days();
    if days < 7 {
        return plural(days, "day");
    }
    if days < 30 {
        return plural(days / 7, "week");
    }
    if days < 365 {
        return plural(days / 30, "month");
    }
    plural(days / 365, "year")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Donation row as seen by donors and receivers
pub fn donation_to_api_value(donation: &Donation, now: DateTime<Utc>) -> Value {
    json!({
        "id": donation.id,
        "medicine_name": donation.medicine_name,
        "manufacturer": donation.manufacturer,
        "expiry_date": donation.expiry_date.to_string(),
        "quantity": donation.quantity,
        "category": donation.category,
        "condition": donation.condition,
        "description": donation.description,
        "image": donation.image,
        "status": donation.status,
        "listed": humanize(now - donation.created_at),
    })
}

/// Request row as seen by its receiver and by admins
pub fn request_to_api_value(request: &MedicineRequest, now: DateTime<Utc>) -> Value {
    json!({
        "id": request.id,
        "medicine_name": request.medicine_name,
        "dosage": request.dosage,
        "quantity": request.quantity,
        "urgency": request.urgency,
        "preferred_location": request.preferred_location,
        "condition_preference": request.condition_preference,
        "notes": request.notes,
        "prescription": request.prescription,
        "prescription_verified": request.prescription_verified,
        "status": request.status,
        "submitted": humanize(now - request.created_at),
    })
}

/// Account row for the admin user listing. Never exposes the password hash.
pub fn account_to_api_value(account: &Account, now: DateTime<Utc>) -> Value {
    json!({
        "id": account.id,
        "username": account.username,
        "email": account.email,
        "status": account.status,
        "verified": account.verified,
        "profile_image": account.profile_image,
        "registered": humanize(now - account.created_at),
    })
}
