use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Server-held identity record keyed by the client cookie. Carries the
/// minimal identity needed to authorize subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
