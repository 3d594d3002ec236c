use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A receiver's request against the donation pool, tracked through the
/// approval workflow
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MedicineRequest {
    pub id: Uuid,
    pub receiver_email: String,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub quantity: i32,
    pub urgency: String,
    pub preferred_location: Option<String>,
    pub condition_preference: Option<String>,
    pub notes: Option<String>,
    pub prescription: Option<String>,
    pub status: String,
    pub prescription_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMedicineRequest {
    pub receiver_email: String,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub quantity: i32,
    pub urgency: String,
    pub preferred_location: Option<String>,
    pub condition_preference: Option<String>,
    pub notes: Option<String>,
    pub prescription: Option<String>,
}
