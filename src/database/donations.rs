use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Donation, NewDonation};
use crate::types::DonationStatus;

const COLUMNS: &str = "id, owner_email, medicine_name, manufacturer, expiry_date, quantity, \
                       category, condition, description, image, status, created_at";

pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new listing with default status `available`
    pub async fn insert(&self, donation: NewDonation) -> Result<Donation, DatabaseError> {
        let sql = format!(
            "INSERT INTO donations \
             (id, owner_email, medicine_name, manufacturer, expiry_date, quantity, \
              category, condition, description, image, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            COLUMNS
        );
        let inserted = sqlx::query_as::<_, Donation>(&sql)
            .bind(Uuid::new_v4())
            .bind(&donation.owner_email)
            .bind(&donation.medicine_name)
            .bind(&donation.manufacturer)
            .bind(donation.expiry_date)
            .bind(donation.quantity)
            .bind(&donation.category)
            .bind(&donation.condition)
            .bind(&donation.description)
            .bind(&donation.image)
            .bind(DonationStatus::Available.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DatabaseError> {
        let sql = format!("SELECT {} FROM donations WHERE id = $1", COLUMNS);
        let donation = sqlx::query_as::<_, Donation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(donation)
    }

    pub async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Donation>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM donations WHERE owner_email = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let donations = sqlx::query_as::<_, Donation>(&sql)
            .bind(owner_email)
            .fetch_all(&self.pool)
            .await?;
        Ok(donations)
    }

    /// The receiver-facing view of the pool
    pub async fn list_available(&self) -> Result<Vec<Donation>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM donations WHERE status = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let donations = sqlx::query_as::<_, Donation>(&sql)
            .bind(DonationStatus::Available.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(donations)
    }

    pub async fn set_status(&self, id: Uuid, status: DonationStatus) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE donations SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: DonationStatus) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donations WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_owner(&self, owner_email: &str) -> Result<i64, DatabaseError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donations WHERE owner_email = $1")
                .bind(owner_email)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn count_by_owner_and_status(
        &self,
        owner_email: &str,
        status: DonationStatus,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM donations WHERE owner_email = $1 AND status = $2",
        )
        .bind(owner_email)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
