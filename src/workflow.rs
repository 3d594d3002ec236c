//! Status transition policy for medicine requests and donation listings.
//!
//! Both state machines are expressed as explicit allowed-transition tables.
//! A transition attempt from a terminal state, or by an unauthorized actor,
//! fails and leaves the record unmodified.

use thiserror::Error;

use crate::types::{DonationStatus, RequestStatus};

/// Who is attempting a status change
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
    Admin,
    Receiver { email: &'a str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot change status from '{from}' to '{to}'")]
    NotAllowed { from: &'static str, to: &'static str },

    #[error("only an administrator can perform this status change")]
    AdminOnly,

    #[error("only the requesting receiver can cancel this request")]
    NotOwner,
}

impl RequestStatus {
    pub fn allowed_transitions(self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[
                RequestStatus::Approved,
                RequestStatus::Rejected,
                RequestStatus::Cancelled,
            ],
            RequestStatus::Approved => &[RequestStatus::Completed],
            // Terminal states accept no further transitions
            RequestStatus::Rejected | RequestStatus::Completed | RequestStatus::Cancelled => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn can_transition_to(self, to: RequestStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

impl DonationStatus {
    pub fn allowed_transitions(self) -> &'static [DonationStatus] {
        match self {
            DonationStatus::Available => &[
                DonationStatus::Pending,
                DonationStatus::Approved,
                DonationStatus::Completed,
                DonationStatus::Expired,
            ],
            DonationStatus::Pending => &[DonationStatus::Approved, DonationStatus::Expired],
            DonationStatus::Approved => &[DonationStatus::Completed, DonationStatus::Collected],
            DonationStatus::Collected => &[DonationStatus::Delivered],
            DonationStatus::Completed | DonationStatus::Delivered | DonationStatus::Expired => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn can_transition_to(self, to: DonationStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

/// Authorize a request status change. Actor authority is checked before the
/// transition table so an unauthorized caller always gets the policy error.
pub fn request_transition(
    from: RequestStatus,
    to: RequestStatus,
    actor: Actor<'_>,
    owner_email: &str,
) -> Result<(), TransitionError> {
    match to {
        RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Completed => {
            if !matches!(actor, Actor::Admin) {
                return Err(TransitionError::AdminOnly);
            }
        }
        RequestStatus::Cancelled => match actor {
            Actor::Receiver { email } if email == owner_email => {}
            _ => return Err(TransitionError::NotOwner),
        },
        RequestStatus::Pending => {
            // Nothing re-enters the pending state
            return Err(TransitionError::NotAllowed {
                from: from.as_str(),
                to: to.as_str(),
            });
        }
    }

    if !from.can_transition_to(to) {
        return Err(TransitionError::NotAllowed {
            from: from.as_str(),
            to: to.as_str(),
        });
    }

    Ok(())
}

/// Authorize a donation status change. All donation moves are admin-driven.
pub fn donation_transition(
    from: DonationStatus,
    to: DonationStatus,
    actor: Actor<'_>,
) -> Result<(), TransitionError> {
    if !matches!(actor, Actor::Admin) {
        return Err(TransitionError::AdminOnly);
    }

    if !from.can_transition_to(to) {
        return Err(TransitionError::NotAllowed {
            from: from.as_str(),
            to: to.as_str(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "r@x.com";

    #[test]
    fn pending_request_has_three_exits() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Completed));
    }

    #[test]
    fn approved_request_only_completes() {
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Completed));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn terminal_request_states_accept_nothing() {
        for terminal in [
            RequestStatus::Rejected,
            RequestStatus::Completed,
            RequestStatus::Cancelled,
        ] {
            assert!(terminal.is_terminal());
            for to in [
                RequestStatus::Pending,
                RequestStatus::Approved,
                RequestStatus::Rejected,
                RequestStatus::Completed,
                RequestStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(to));
            }
        }
    }

    #[test]
    fn admin_approves_pending_request() {
        assert_eq!(
            request_transition(RequestStatus::Pending, RequestStatus::Approved, Actor::Admin, OWNER),
            Ok(())
        );
    }

    #[test]
    fn receiver_cannot_approve_own_request() {
        let actor = Actor::Receiver { email: OWNER };
        assert_eq!(
            request_transition(RequestStatus::Pending, RequestStatus::Approved, actor, OWNER),
            Err(TransitionError::AdminOnly)
        );
    }

    #[test]
    fn owner_cancels_pending_request() {
        let actor = Actor::Receiver { email: OWNER };
        assert_eq!(
            request_transition(RequestStatus::Pending, RequestStatus::Cancelled, actor, OWNER),
            Ok(())
        );
    }

    #[test]
    fn other_receiver_cannot_cancel() {
        let actor = Actor::Receiver { email: "someone-else@x.com" };
        assert_eq!(
            request_transition(RequestStatus::Pending, RequestStatus::Cancelled, actor, OWNER),
            Err(TransitionError::NotOwner)
        );
    }

    #[test]
    fn admin_cannot_cancel_on_behalf_of_receiver() {
        assert_eq!(
            request_transition(RequestStatus::Pending, RequestStatus::Cancelled, Actor::Admin, OWNER),
            Err(TransitionError::NotOwner)
        );
    }

    #[test]
    fn second_cancel_is_rejected_not_ignored() {
        let actor = Actor::Receiver { email: OWNER };
        assert_eq!(
            request_transition(RequestStatus::Cancelled, RequestStatus::Cancelled, actor, OWNER),
            Err(TransitionError::NotAllowed { from: "cancelled", to: "cancelled" })
        );
    }

    #[test]
    fn cancel_after_approval_is_rejected() {
        let actor = Actor::Receiver { email: OWNER };
        assert_eq!(
            request_transition(RequestStatus::Approved, RequestStatus::Cancelled, actor, OWNER),
            Err(TransitionError::NotAllowed { from: "approved", to: "cancelled" })
        );
    }

    #[test]
    fn nothing_returns_to_pending() {
        assert_eq!(
            request_transition(RequestStatus::Approved, RequestStatus::Pending, Actor::Admin, OWNER),
            Err(TransitionError::NotAllowed { from: "approved", to: "pending" })
        );
    }

    #[test]
    fn donation_lifecycle_table() {
        assert!(DonationStatus::Available.can_transition_to(DonationStatus::Pending));
        assert!(DonationStatus::Available.can_transition_to(DonationStatus::Approved));
        assert!(DonationStatus::Available.can_transition_to(DonationStatus::Completed));
        assert!(DonationStatus::Available.can_transition_to(DonationStatus::Expired));
        assert!(!DonationStatus::Available.can_transition_to(DonationStatus::Delivered));
        assert!(!DonationStatus::Available.can_transition_to(DonationStatus::Collected));
        assert!(DonationStatus::Approved.can_transition_to(DonationStatus::Collected));
        assert!(DonationStatus::Collected.can_transition_to(DonationStatus::Delivered));
        // Nothing returns to the pool once it leaves
        for status in [
            DonationStatus::Pending,
            DonationStatus::Approved,
            DonationStatus::Completed,
            DonationStatus::Collected,
            DonationStatus::Delivered,
            DonationStatus::Expired,
        ] {
            assert!(!status.can_transition_to(DonationStatus::Available));
        }
    }

    #[test]
    fn expired_donation_accepts_nothing() {
        assert!(DonationStatus::Expired.is_terminal());
        assert_eq!(
            donation_transition(DonationStatus::Expired, DonationStatus::Available, Actor::Admin),
            Err(TransitionError::NotAllowed { from: "expired", to: "available" })
        );
    }

    #[test]
    fn donation_moves_are_admin_only() {
        let actor = Actor::Receiver { email: OWNER };
        assert_eq!(
            donation_transition(DonationStatus::Available, DonationStatus::Approved, actor),
            Err(TransitionError::AdminOnly)
        );
    }
}
