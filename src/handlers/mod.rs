pub mod admin;
pub mod dashboard;
pub mod donor;
pub mod form;
pub mod profile;
pub mod public;
pub mod receiver;

use crate::error::ApiError;
use crate::types::{DonationStatus, RequestStatus};
use uuid::Uuid;

/// Parse a client-supplied record id
pub(crate) fn parse_record_id(raw: Option<&str>, what: &str) -> Result<Uuid, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("{} id is required", what)))?;
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} id", what)))
}

/// A stored status column that fails to parse is corrupt data, not client
/// error; report it generically and log the row value.
pub(crate) fn stored_request_status(raw: &str) -> Result<RequestStatus, ApiError> {
    RequestStatus::parse(raw).ok_or_else(|| {
        tracing::error!("Unknown request status '{}' in storage", raw);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}

pub(crate) fn stored_donation_status(raw: &str) -> Result<DonationStatus, ApiError> {
    DonationStatus::parse(raw).ok_or_else(|| {
        tracing::error!("Unknown donation status '{}' in storage", raw);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_parsing() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(Some(&id.to_string()), "request").ok(), Some(id));
        assert!(parse_record_id(Some("not-a-uuid"), "request").is_err());
        assert!(parse_record_id(Some("  "), "request").is_err());
        assert!(parse_record_id(None, "request").is_err());
    }
}
