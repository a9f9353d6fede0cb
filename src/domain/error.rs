//! Domain errors

use thiserror::Error;

use crate::notifications::NotificationKind;

/// Invariant violations on entity data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("End date must be after start date.")]
    InvalidDateOrder,

    #[error("Invalid domain(s): {0}")]
    InvalidEmailDomain(String),

    /// Registration/event instants out of order.
    #[error("Please enter valid date")]
    InvalidSchedule,

    #[error("Ticket is already cancelled.")]
    AlreadyCancelled,
}

/// Reasons a registration attempt is refused.
///
/// These are expected business outcomes, not faults. The order in which the
/// evaluator raises them is fixed; see `RegistrationService::register`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationDenied {
    #[error("This event has reached the maximum number of attendees.")]
    CapacityExceeded,

    #[error("Registration for this event is not allowed.")]
    RegistrationWindowClosed,

    /// Carries the current registration status, lower-cased.
    #[error("Registration for this event is {status} now.")]
    RegistrationStatusNotOpen { status: String },

    #[error("Your email domain is not authorized to register for this event.")]
    DomainNotAuthorized,

    #[error("Please set your birth date in account information.")]
    BirthDateMissing,

    #[error("You must be at least {required} years old to attend this event.")]
    AgeRequirementNotMet { required: u32 },

    #[error("Organizer cannot register for their own event.")]
    OrganizerSelfRegistration,

    #[error("User has already registered for this event.")]
    DuplicateRegistration,
}

impl RegistrationDenied {
    /// Domain restriction on a private event is an authorization failure
    /// (403-equivalent); every other denial maps to a plain rejection (400).
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::DomainNotAuthorized)
    }
}

/// Boundary error type for all core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Denied(#[from] RegistrationDenied),

    /// Entity absent, or not owned by the caller. The two cases are
    /// deliberately indistinguishable so existence does not leak.
    #[error("{entity} with ID {id} does not exist or you do not have permission to access it.")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness violation reported by the persistence layer.
    #[error("Already exists: {0}")]
    Conflict(String),

    /// A notification the operation depends on could not be delivered.
    #[error("Failed to send {kind} email")]
    NotificationFailed { kind: NotificationKind, reason: String },

    /// Infrastructure fault. The detail stays out of the message; callers
    /// only ever see the generic text.
    #[error("Internal server error")]
    Unexpected(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_messages_embed_details() {
        let denied = RegistrationDenied::RegistrationStatusNotOpen {
            status: "closed".to_string(),
        };
        assert_eq!(
            denied.to_string(),
            "Registration for this event is closed now."
        );

        let denied = RegistrationDenied::AgeRequirementNotMet { required: 20 };
        assert_eq!(
            denied.to_string(),
            "You must be at least 20 years old to attend this event."
        );
    }

    #[test]
    fn only_domain_restriction_is_authorization_class() {
        assert!(RegistrationDenied::DomainNotAuthorized.is_authorization());
        assert!(!RegistrationDenied::CapacityExceeded.is_authorization());
        assert!(!RegistrationDenied::DuplicateRegistration.is_authorization());
    }

    #[test]
    fn unexpected_never_exposes_detail() {
        let err = DomainError::Unexpected("pool exhausted on shard 7".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
