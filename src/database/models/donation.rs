use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A donor-listed medicine item available for receiver request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    pub id: Uuid,
    pub owner_email: String,
    pub medicine_name: String,
    pub manufacturer: Option<String>,
    pub expiry_date: NaiveDate,
    pub quantity: i32,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDonation {
    pub owner_email: String,
    pub medicine_name: String,
    pub manufacturer: Option<String>,
    pub expiry_date: NaiveDate,
    pub quantity: i32,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
