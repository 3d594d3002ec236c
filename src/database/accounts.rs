use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Account, NewAccount};
use crate::types::{AccountStatus, Role};

const COLUMNS: &str = "id, username, email, password_hash, status, verified, profile_image, created_at";

/// Data access for the per-role account tables. The role argument picks the
/// table; everything else about the three tables is identical.
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<Account>, DatabaseError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", COLUMNS, role.table());
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, role: Role, id: Uuid) -> Result<Option<Account>, DatabaseError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, role.table());
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    /// Insert a new account with default status `active` and `verified = false`
    pub async fn insert(&self, role: Role, account: NewAccount) -> Result<Account, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (id, username, email, password_hash, status, verified) \
             VALUES ($1, $2, $3, $4, $5, FALSE) RETURNING {}",
            role.table(),
            COLUMNS
        );
        let inserted = sqlx::query_as::<_, Account>(&sql)
            .bind(Uuid::new_v4())
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(AccountStatus::Active.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    /// Returns false when no account with that id exists
    pub async fn set_status(
        &self,
        role: Role,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, DatabaseError> {
        let sql = format!("UPDATE {} SET status = $2 WHERE id = $1", role.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_verified(&self, role: Role, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!("UPDATE {} SET verified = TRUE WHERE id = $1", role.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_profile_image(
        &self,
        role: Role,
        id: Uuid,
        image: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let sql = format!("UPDATE {} SET profile_image = $2 WHERE id = $1", role.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(image)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list(&self, role: Role) -> Result<Vec<Account>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC",
            COLUMNS,
            role.table()
        );
        let accounts = sqlx::query_as::<_, Account>(&sql).fetch_all(&self.pool).await?;
        Ok(accounts)
    }

    pub async fn count(&self, role: Role) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", role.table());
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn count_since(
        &self,
        role: Role,
        cutoff: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE created_at >= $1",
            role.table()
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(cutoff)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
