//! Notification trigger interface
//!
//! The core hands fully-resolved payloads to a `Notifier`; delivery
//! transport and templating live behind the trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Registration,
    Cancellation,
    Reminder,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration_confirmation",
            Self::Cancellation => "cancellation",
            Self::Reminder => "reminder",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registration => write!(f, "registration confirmation"),
            Self::Cancellation => write!(f, "cancellation"),
            Self::Reminder => write!(f, "reminder"),
        }
    }
}

/// Everything a delivery channel needs to render a ticket notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketNotification {
    pub kind: NotificationKind,
    /// Attendee email address
    pub recipient: String,
    pub attendee_name: String,
    pub event_name: String,
    pub event_start: DateTime<Utc>,
    pub event_address: Option<String>,
    pub ticket_number: String,
}

impl TicketNotification {
    /// Subject line in the style the surrounding product uses.
    pub fn subject(&self) -> String {
        match self.kind {
            NotificationKind::Registration => {
                format!("Registration Confirmed - {}", self.event_name)
            }
            NotificationKind::Cancellation => format!("Ticket Cancelled - {}", self.event_name),
            NotificationKind::Reminder => {
                format!("Reminder: {} is tomorrow!", self.event_name)
            }
        }
    }
}

/// Delivery failure reported by a notifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);

/// Outbound notification channel. Implementations must not panic on
/// delivery failure; they report it and the caller decides whether the
/// failure blocks the surrounding operation.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &TicketNotification) -> Result<(), NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_notification(kind: NotificationKind) -> TicketNotification {
        TicketNotification {
            kind,
            recipient: "alice@example.com".to_string(),
            attendee_name: "Alice Anderson".to_string(),
            event_name: "Rust Meetup".to_string(),
            event_start: Utc.with_ymd_and_hms(2024, 11, 1, 12, 0, 0).unwrap(),
            event_address: None,
            ticket_number: "TICKET-AAAA1111".to_string(),
        }
    }

    #[test]
    fn subjects_name_the_event() {
        assert_eq!(
            sample_notification(NotificationKind::Registration).subject(),
            "Registration Confirmed - Rust Meetup"
        );
        assert_eq!(
            sample_notification(NotificationKind::Cancellation).subject(),
            "Ticket Cancelled - Rust Meetup"
        );
        assert_eq!(
            sample_notification(NotificationKind::Reminder).subject(),
            "Reminder: Rust Meetup is tomorrow!"
        );
    }

    #[test]
    fn payload_serializes_with_snake_case_kind() {
        let json =
            serde_json::to_value(sample_notification(NotificationKind::Reminder)).unwrap();
        assert_eq!(json["kind"], "reminder");
        assert_eq!(json["recipient"], "alice@example.com");
    }
}
