/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Account role. Determines which dashboard and mutation endpoints are
/// reachable and which account table a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Receiver,
    Admin,
}

impl Role {
    /// Fixed lookup order used by login. An email duplicated across roles
    /// always resolves to the earliest table in this list.
    pub const LOGIN_ORDER: [Role; 3] = [Role::Donor, Role::Receiver, Role::Admin];

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "donor" => Some(Role::Donor),
            "receiver" => Some(Role::Receiver),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Receiver => "receiver",
            Role::Admin => "admin",
        }
    }

    /// Account table backing this role
    pub fn table(&self) -> &'static str {
        match self {
            Role::Donor => "donor_accounts",
            Role::Receiver => "receiver_accounts",
            Role::Admin => "admin_accounts",
        }
    }

    /// Subdirectory under the upload root for files owned by this role
    pub fn upload_dir(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moderation state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Blocked,
}

impl AccountStatus {
    pub fn parse(value: &str) -> Option<AccountStatus> {
        match value {
            "active" => Some(AccountStatus::Active),
            "suspended" => Some(AccountStatus::Suspended),
            "blocked" => Some(AccountStatus::Blocked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a donated item listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Available,
    Pending,
    Approved,
    Completed,
    Collected,
    Delivered,
    Expired,
}

impl DonationStatus {
    pub fn parse(value: &str) -> Option<DonationStatus> {
        match value {
            "available" => Some(DonationStatus::Available),
            "pending" => Some(DonationStatus::Pending),
            "approved" => Some(DonationStatus::Approved),
            "completed" => Some(DonationStatus::Completed),
            "collected" => Some(DonationStatus::Collected),
            "delivered" => Some(DonationStatus::Delivered),
            "expired" => Some(DonationStatus::Expired),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Pending => "pending",
            DonationStatus::Approved => "approved",
            DonationStatus::Completed => "completed",
            DonationStatus::Collected => "collected",
            DonationStatus::Delivered => "delivered",
            DonationStatus::Expired => "expired",
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval workflow state of a medicine request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn parse(value: &str) -> Option<RequestStatus> {
        match value {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            "completed" => Some(RequestStatus::Completed),
            "cancelled" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How quickly a receiver needs the medicine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Normal,
    Urgent,
    Immediate,
}

impl Urgency {
    pub fn parse(value: &str) -> Option<Urgency> {
        match value {
            "low" => Some(Urgency::Low),
            "normal" => Some(Urgency::Normal),
            "urgent" => Some(Urgency::Urgent),
            "immediate" => Some(Urgency::Immediate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
