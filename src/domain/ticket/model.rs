//! Ticket domain entity
//!
//! One attendee's registration for one event. Tickets are created only by
//! the registration evaluator; the persistence layer enforces at most one
//! ticket per `(event, attendee)` pair regardless of status.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::domain::attendee::Attendee;
use crate::domain::error::ValidationError;
use crate::domain::event::Event;

/// Ticket status. Only `Active` counts toward capacity and duplicate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Active,
    Cancelled,
    Expired,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "CANCELLED" => Self::Cancelled,
            "EXPIRED" => Self::Expired,
            _ => Self::Active,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const TICKET_NUMBER_PREFIX: &str = "TICKET";

const TICKET_NUMBER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TICKET_NUMBER_SUFFIX_LEN: usize = 8;

/// Generate an opaque ticket number, `TICKET-` plus eight random
/// uppercase-alphanumeric characters. Uniqueness is the caller's concern;
/// the evaluator probes the repository and the store's uniqueness index is
/// the final arbiter.
pub fn generate_ticket_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TICKET_NUMBER_SUFFIX_LEN)
        .map(|_| TICKET_NUMBER_ALPHABET[rng.gen_range(0..TICKET_NUMBER_ALPHABET.len())] as char)
        .collect();
    format!("{TICKET_NUMBER_PREFIX}-{suffix}")
}

/// A registration of one attendee for one event.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub event_id: Uuid,
    pub attendee_id: Uuid,
    pub register_date: DateTime<Utc>,
    pub status: TicketStatus,
    /// Opaque unique identifier, fixed at creation
    pub ticket_number: String,
    /// Set exactly once, on the first cancellation
    pub cancellation_date: Option<DateTime<Utc>>,
    /// Armed by a successful registration confirmation; gates and is
    /// cleared by the reminder sweep
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(event_id: Uuid, attendee_id: Uuid, register_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            attendee_id,
            register_date,
            status: TicketStatus::Active,
            ticket_number: generate_ticket_number(),
            cancellation_date: None,
            email_sent: false,
            created_at: register_date,
            updated_at: register_date,
        }
    }

    /// Transition to `Cancelled`, keeping the row. A pre-set cancellation
    /// date (seeded data) is preserved; otherwise it is stamped with `now`.
    pub fn mark_cancelled(&mut self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.status == TicketStatus::Cancelled {
            return Err(ValidationError::AlreadyCancelled);
        }
        self.status = TicketStatus::Cancelled;
        if self.cancellation_date.is_none() {
            self.cancellation_date = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == TicketStatus::Active
    }

    /// Whether the holder satisfies the event's age requirement on `today`.
    /// Without a birth date the holder can never satisfy an age gate.
    pub fn is_age_eligible(&self, event: &Event, attendee: &Attendee, today: NaiveDate) -> bool {
        match attendee.age_on(today) {
            Some(age) => age >= event.min_age_requirement as i32,
            None => false,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn instant(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, h, 0, 0).unwrap()
    }

    fn sample_ticket() -> Ticket {
        Ticket::new(Uuid::new_v4(), Uuid::new_v4(), instant(9))
    }

    fn sample_event(min_age: u32) -> Event {
        let mut event = Event::new(
            Uuid::new_v4(),
            "Jazz Night",
            instant(8),
            instant(10),
            instant(12),
            instant(18),
        );
        event.min_age_requirement = min_age;
        event
    }

    fn attendee_born(date: Option<&str>) -> Attendee {
        let mut attendee = Attendee::new("bob@example.com", "Bob", "Brown");
        attendee.birth_date = date.map(|d| d.parse().unwrap());
        attendee
    }

    #[test]
    fn ticket_number_has_expected_shape() {
        let number = generate_ticket_number();
        assert!(number.starts_with("TICKET-"));
        assert_eq!(number.len(), "TICKET-".len() + 8);
        assert!(number["TICKET-".len()..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn new_ticket_is_active_and_unsent() {
        let ticket = sample_ticket();
        assert!(ticket.is_active());
        assert!(!ticket.email_sent);
        assert!(ticket.cancellation_date.is_none());
    }

    #[test]
    fn cancel_stamps_date_once() {
        let mut ticket = sample_ticket();
        ticket.mark_cancelled(instant(11)).unwrap();
        assert_eq!(ticket.status, TicketStatus::Cancelled);
        assert_eq!(ticket.cancellation_date, Some(instant(11)));
    }

    #[test]
    fn cancel_twice_is_rejected_and_date_is_untouched() {
        let mut ticket = sample_ticket();
        ticket.mark_cancelled(instant(11)).unwrap();
        let err = ticket.mark_cancelled(instant(12)).unwrap_err();
        assert_eq!(err, ValidationError::AlreadyCancelled);
        assert_eq!(ticket.cancellation_date, Some(instant(11)));
    }

    #[test]
    fn cancel_preserves_seeded_cancellation_date() {
        let mut ticket = sample_ticket();
        ticket.cancellation_date = Some(instant(7) - Duration::days(30));
        ticket.mark_cancelled(instant(11)).unwrap();
        assert_eq!(ticket.cancellation_date, Some(instant(7) - Duration::days(30)));
    }

    #[test]
    fn age_gate_accepts_old_enough_attendees() {
        let ticket = sample_ticket();
        let event = sample_event(20);
        let attendee = attendee_born(Some("2000-06-15"));
        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert!(ticket.is_age_eligible(&event, &attendee, today));
    }

    #[test]
    fn age_gate_rejects_too_young_attendees() {
        let ticket = sample_ticket();
        let event = sample_event(30);
        let attendee = attendee_born(Some("2000-06-15"));
        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert!(!ticket.is_age_eligible(&event, &attendee, today));
    }

    #[test]
    fn age_gate_fails_without_birth_date_even_when_zero() {
        let ticket = sample_ticket();
        let event = sample_event(0);
        let attendee = attendee_born(None);
        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        assert!(!ticket.is_age_eligible(&event, &attendee, today));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            TicketStatus::Active,
            TicketStatus::Cancelled,
            TicketStatus::Expired,
        ] {
            assert_eq!(&TicketStatus::from_str(status.as_str()), status);
        }
    }
}
