//! Dashboard aggregation queries.
//!
//! Each stats endpoint performs independent count passes over current table
//! state, recomputed on every call. Any read error degrades to a zero-filled
//! stats object instead of propagating: the dashboards are best-effort by
//! contract.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::database::manager::DatabaseError;
use crate::database::{AccountRepository, DatabaseManager, DonationRepository, RequestRepository};
use crate::types::{DonationStatus, RequestStatus, Role};

#[derive(Debug, Default, Serialize)]
pub struct DonorStats {
    pub total_donations: i64,
    pub available: i64,
    pub pending: i64,
    pub approved: i64,
    pub completed: i64,
    pub expired: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct ReceiverStats {
    pub total_requests: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct AdminStats {
    pub total_donors: i64,
    pub total_receivers: i64,
    pub total_donations: i64,
    pub available_donations: i64,
    pub total_requests: i64,
    pub pending_requests: i64,
    pub approved_requests: i64,
    pub completed_requests: i64,
    pub registrations_today: i64,
}

/// UTC midnight at the start of the current day
fn today_utc_cutoff() -> DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

pub async fn donor_stats(owner_email: &str) -> DonorStats {
    match try_donor_stats(owner_email).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Donor stats degraded to zero-fill: {}", e);
            DonorStats::default()
        }
    }
}

async fn try_donor_stats(owner_email: &str) -> Result<DonorStats, DatabaseError> {
    let pool = DatabaseManager::pool().await?;
    let donations = DonationRepository::new(pool);

    Ok(DonorStats {
        total_donations: donations.count_by_owner(owner_email).await?,
        available: donations
            .count_by_owner_and_status(owner_email, DonationStatus::Available)
            .await?,
        pending: donations
            .count_by_owner_and_status(owner_email, DonationStatus::Pending)
            .await?,
        approved: donations
            .count_by_owner_and_status(owner_email, DonationStatus::Approved)
            .await?,
        completed: donations
            .count_by_owner_and_status(owner_email, DonationStatus::Completed)
            .await?,
        expired: donations
            .count_by_owner_and_status(owner_email, DonationStatus::Expired)
            .await?,
    })
}

pub async fn receiver_stats(receiver_email: &str) -> ReceiverStats {
    match try_receiver_stats(receiver_email).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Receiver stats degraded to zero-fill: {}", e);
            ReceiverStats::default()
        }
    }
}

async fn try_receiver_stats(receiver_email: &str) -> Result<ReceiverStats, DatabaseError> {
    let pool = DatabaseManager::pool().await?;
    let requests = RequestRepository::new(pool);

    Ok(ReceiverStats {
        total_requests: requests.count_by_receiver(receiver_email).await?,
        pending: requests
            .count_by_receiver_and_status(receiver_email, RequestStatus::Pending)
            .await?,
        approved: requests
            .count_by_receiver_and_status(receiver_email, RequestStatus::Approved)
            .await?,
        rejected: requests
            .count_by_receiver_and_status(receiver_email, RequestStatus::Rejected)
            .await?,
        completed: requests
            .count_by_receiver_and_status(receiver_email, RequestStatus::Completed)
            .await?,
        cancelled: requests
            .count_by_receiver_and_status(receiver_email, RequestStatus::Cancelled)
            .await?,
    })
}

pub async fn admin_stats() -> AdminStats {
    match try_admin_stats().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Admin stats degraded to zero-fill: {}", e);
            AdminStats::default()
        }
    }
}

async fn try_admin_stats() -> Result<AdminStats, DatabaseError> {
    let pool = DatabaseManager::pool().await?;
    let accounts = AccountRepository::new(pool.clone());
    let donations = DonationRepository::new(pool.clone());
    let requests = RequestRepository::new(pool);

    let cutoff = today_utc_cutoff();
    let registrations_today = accounts.count_since(Role::Donor, cutoff).await?
        + accounts.count_since(Role::Receiver, cutoff).await?
        + accounts.count_since(Role::Admin, cutoff).await?;

    Ok(AdminStats {
        total_donors: accounts.count(Role::Donor).await?,
        total_receivers: accounts.count(Role::Receiver).await?,
        total_donations: donations.count().await?,
        available_donations: donations.count_by_status(DonationStatus::Available).await?,
        total_requests: requests.count().await?,
        pending_requests: requests.count_by_status(RequestStatus::Pending).await?,
        approved_requests: requests.count_by_status(RequestStatus::Approved).await?,
        completed_requests: requests.count_by_status(RequestStatus::Completed).await?,
        registrations_today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_filled_fallbacks_serialize_with_all_fields() {
        let value = serde_json::to_value(AdminStats::default()).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 9);
        assert!(object.values().all(|v| v.as_i64() == Some(0)));
    }

    #[test]
    fn cutoff_is_start_of_current_utc_day() {
        let cutoff = today_utc_cutoff();
        let now = Utc::now();
        assert!(cutoff <= now);
        assert_eq!(cutoff.time(), NaiveTime::MIN);
        assert_eq!(cutoff.date_naive(), now.date_naive());
    }
}
