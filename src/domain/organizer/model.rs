//! Organizer domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Verification state of an organizer profile. Independent of registration
/// logic; carried for the surrounding management surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "VERIFIED" => Self::Verified,
            "REJECTED" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Organizer profile, one-to-one with an attendee account. Events belong to
/// exactly one organizer.
#[derive(Debug, Clone)]
pub struct Organizer {
    pub id: Uuid,
    /// The attendee account this profile belongs to
    pub user_id: Uuid,
    /// Display name, globally unique among organizers
    pub organizer_name: String,
    pub email: String,
    pub verification_status: VerificationStatus,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organizer {
    pub fn new(user_id: Uuid, organizer_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            organizer_name: organizer_name.into(),
            email: email.into(),
            verification_status: VerificationStatus::Pending,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_organizer_starts_unverified() {
        let organizer = Organizer::new(Uuid::new_v4(), "KU Tech Club", "club@ku.th");
        assert_eq!(organizer.verification_status, VerificationStatus::Pending);
        assert!(!organizer.is_verified);
    }

    #[test]
    fn verification_status_string_roundtrip() {
        for status in &[
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(&VerificationStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_verification_status_defaults_to_pending() {
        assert_eq!(
            VerificationStatus::from_str("SOMETHING_ELSE"),
            VerificationStatus::Pending
        );
    }
}
