use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::{Account, Session};
use crate::types::Role;

const COLUMNS: &str = "token, account_id, username, email, role, profile_image, created_at, expires_at";

pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a session row for a freshly authenticated account
    pub async fn create(
        &self,
        token: &str,
        account: &Account,
        role: Role,
    ) -> Result<Session, DatabaseError> {
        let ttl = Duration::hours(config::config().security.session_ttl_hours);
        let expires_at = Utc::now() + ttl;

        let sql = format!(
            "INSERT INTO sessions (token, account_id, username, email, role, profile_image, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        );
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(token)
            .bind(account.id)
            .bind(&account.username)
            .bind(&account.email)
            .bind(role.as_str())
            .bind(&account.profile_image)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(session)
    }

    /// Look up a session, treating expired rows as absent
    pub async fn find_valid(&self, token: &str) -> Result<Option<Session>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM sessions WHERE token = $1 AND expires_at > now()",
            COLUMNS
        );
        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(session)
    }

    pub async fn delete(&self, token: &str) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Keep live sessions in step with a profile image change
    pub async fn update_profile_image(
        &self,
        account_id: Uuid,
        image: Option<&str>,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE sessions SET profile_image = $2 WHERE account_id = $1")
            .bind(account_id)
            .bind(image)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
