use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{MedicineRequest, NewMedicineRequest};
use crate::types::RequestStatus;

const COLUMNS: &str = "id, receiver_email, medicine_name, dosage, quantity, urgency, \
                       preferred_location, condition_preference, notes, prescription, \
                       status, prescription_verified, created_at, updated_at";

pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new request with default status `pending`
    pub async fn insert(
        &self,
        request: NewMedicineRequest,
    ) -> Result<MedicineRequest, DatabaseError> {
        let sql = format!(
            "INSERT INTO medicine_requests \
             (id, receiver_email, medicine_name, dosage, quantity, urgency, \
              preferred_location, condition_preference, notes, prescription, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            COLUMNS
        );
        let inserted = sqlx::query_as::<_, MedicineRequest>(&sql)
            .bind(Uuid::new_v4())
            .bind(&request.receiver_email)
            .bind(&request.medicine_name)
            .bind(&request.dosage)
            .bind(request.quantity)
            .bind(&request.urgency)
            .bind(&request.preferred_location)
            .bind(&request.condition_preference)
            .bind(&request.notes)
            .bind(&request.prescription)
            .bind(RequestStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MedicineRequest>, DatabaseError> {
        let sql = format!("SELECT {} FROM medicine_requests WHERE id = $1", COLUMNS);
        let request = sqlx::query_as::<_, MedicineRequest>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    pub async fn list_by_receiver(
        &self,
        receiver_email: &str,
    ) -> Result<Vec<MedicineRequest>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM medicine_requests WHERE receiver_email = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let requests = sqlx::query_as::<_, MedicineRequest>(&sql)
            .bind(receiver_email)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn list(&self) -> Result<Vec<MedicineRequest>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM medicine_requests ORDER BY created_at DESC",
            COLUMNS
        );
        let requests = sqlx::query_as::<_, MedicineRequest>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn set_status(&self, id: Uuid, status: RequestStatus) -> Result<bool, DatabaseError> {
        let result =
            sqlx::query("UPDATE medicine_requests SET status = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_prescription_verified(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE medicine_requests SET prescription_verified = TRUE, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM medicine_requests")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: RequestStatus) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicine_requests WHERE status = $1",
        )
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_by_receiver(&self, receiver_email: &str) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicine_requests WHERE receiver_email = $1",
        )
        .bind(receiver_email)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_by_receiver_and_status(
        &self,
        receiver_email: &str,
        status: RequestStatus,
    ) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicine_requests WHERE receiver_email = $1 AND status = $2",
        )
        .bind(receiver_email)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
