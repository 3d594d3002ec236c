use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of a role account table. The status column is stored as text;
/// use `AccountStatus::parse` where the typed value is needed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub verified: bool,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at registration. Defaults (active status, unverified,
/// no profile image) are applied by the insert.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
