//! Event domain entity
//!
//! Owns the registration-window, capacity and visibility rules and derives
//! the two presentable status fields. The entity holds no repository handle;
//! the caller passes the current active-ticket count into the operations
//! that need it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::ValidationError;

/// Lifecycle status derived from wall-clock time against the event window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "UPCOMING",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ONGOING" => Self::Ongoing,
            "COMPLETED" => Self::Completed,
            _ => Self::Upcoming,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration status, persisted as a best-effort hint and recomputed
/// before critical decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Open,
    Closed,
    Full,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
            Self::Full => "FULL",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "CLOSED" => Self::Closed,
            "FULL" => Self::Full,
            _ => Self::Open,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event published by an organizer.
///
/// Schedule invariant: `start_date_register <= end_date_register <=
/// start_date_event <= end_date_event`.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    /// Owning organizer; deleting the organizer deletes the event
    pub organizer_id: Uuid,
    pub event_name: String,
    pub description: String,
    pub address: Option<String>,
    pub event_create_date: DateTime<Utc>,
    pub start_date_register: DateTime<Utc>,
    pub end_date_register: DateTime<Utc>,
    pub start_date_event: DateTime<Utc>,
    pub end_date_event: DateTime<Utc>,
    /// `None` or `Some(0)` means unlimited
    pub max_attendee: Option<u32>,
    pub visibility: Visibility,
    /// Allow-listed email domains; only meaningful when visibility is Private
    pub allowed_email_domains: Vec<String>,
    /// Minimum attendee age in whole years; 0 means no age gate
    pub min_age_requirement: u32,
    pub status: EventStatus,
    pub registration_status: RegistrationStatus,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        organizer_id: Uuid,
        event_name: impl Into<String>,
        start_date_register: DateTime<Utc>,
        end_date_register: DateTime<Utc>,
        start_date_event: DateTime<Utc>,
        end_date_event: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organizer_id,
            event_name: event_name.into(),
            description: String::new(),
            address: None,
            event_create_date: now,
            start_date_register,
            end_date_register,
            start_date_event,
            end_date_event,
            max_attendee: None,
            visibility: Visibility::Public,
            allowed_email_domains: Vec::new(),
            min_age_requirement: 0,
            status: EventStatus::Upcoming,
            registration_status: RegistrationStatus::Open,
            updated_at: now,
        }
    }

    /// Effective capacity; `None` when unlimited (unset or zero).
    fn capacity(&self) -> Option<u32> {
        match self.max_attendee {
            None | Some(0) => None,
            Some(max) => Some(max),
        }
    }

    /// Spots left given the current active-ticket count. An unlimited event
    /// reports the registered count itself (sentinel, not a remaining
    /// quantity); a capped event never reports below zero.
    pub fn available_spots(&self, active_count: u32) -> u32 {
        match self.capacity() {
            None => active_count,
            Some(max) => max.saturating_sub(active_count),
        }
    }

    /// Whether the event has reached capacity. Always false when unlimited.
    pub fn is_full(&self, active_count: u32) -> bool {
        match self.capacity() {
            None => false,
            Some(max) => active_count == max,
        }
    }

    /// Whether `now` falls inside the half-open registration window
    /// `[start_date_register, end_date_register)`.
    pub fn is_registration_window_open(&self, now: DateTime<Utc>) -> bool {
        self.start_date_register <= now && now < self.end_date_register
    }

    /// Whether the persisted registration status still admits registration.
    pub fn is_registration_status_open(&self) -> bool {
        !matches!(
            self.registration_status,
            RegistrationStatus::Closed | RegistrationStatus::Full
        )
    }

    /// Whether an email address may register for this event under the
    /// domain restriction. Public events and events without configured
    /// domains accept everyone. A malformed address without `@` is
    /// disallowed (fails closed). Matching is trimmed and case-insensitive.
    pub fn is_email_domain_allowed(&self, email: &str) -> bool {
        if self.visibility == Visibility::Public || self.allowed_email_domains.is_empty() {
            return true;
        }
        let Some(domain) = email.split('@').nth(1) else {
            return false;
        };
        let domain = domain.trim();
        self.allowed_email_domains
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .any(|d| d.eq_ignore_ascii_case(domain))
    }

    /// Lifecycle status for `now`: Upcoming before the event starts, Ongoing
    /// until it ends, Completed afterwards.
    pub fn lifecycle_status(&self, now: DateTime<Utc>) -> EventStatus {
        if now < self.start_date_event {
            EventStatus::Upcoming
        } else if now < self.end_date_event {
            EventStatus::Ongoing
        } else {
            EventStatus::Completed
        }
    }

    /// Recompute and store the lifecycle status.
    pub fn refresh_lifecycle_status(&mut self, now: DateTime<Utc>) -> EventStatus {
        self.status = self.lifecycle_status(now);
        self.status
    }

    /// Registration status for `now` and the current active-ticket count.
    /// Full takes priority whenever capacity is set and reached; otherwise
    /// Closed once the registration window has ended, else Open.
    pub fn registration_status_for(
        &self,
        now: DateTime<Utc>,
        active_count: u32,
    ) -> RegistrationStatus {
        if let Some(max) = self.capacity() {
            if active_count >= max {
                return RegistrationStatus::Full;
            }
        }
        if now > self.end_date_register {
            RegistrationStatus::Closed
        } else {
            RegistrationStatus::Open
        }
    }

    /// Recompute and store the registration status. Callers persist the
    /// entity afterwards; the stored field is a hint, not the source of
    /// truth.
    pub fn refresh_registration_status(
        &mut self,
        now: DateTime<Utc>,
        active_count: u32,
    ) -> RegistrationStatus {
        self.registration_status = self.registration_status_for(now, active_count);
        self.registration_status
    }

    /// Whether the four schedule instants are in order.
    pub fn is_schedule_ordered(&self) -> bool {
        self.start_date_register <= self.end_date_register
            && self.end_date_register <= self.start_date_event
            && self.start_date_event <= self.end_date_event
    }

    /// Validate entity invariants: configured domains must look like
    /// hostnames, and the event must end after it starts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.visibility == Visibility::Private && !self.allowed_email_domains.is_empty() {
            let invalid: Vec<&str> = self
                .allowed_email_domains
                .iter()
                .map(|d| d.trim())
                .filter(|d| !is_valid_domain(d))
                .collect();
            if !invalid.is_empty() {
                return Err(ValidationError::InvalidEmailDomain(invalid.join(", ")));
            }
        }
        if self.start_date_event >= self.end_date_event {
            return Err(ValidationError::InvalidDateOrder);
        }
        Ok(())
    }
}

/// Split a comma-separated allow-list into domain entries, dropping blanks.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Hostname-token check: dot-separated labels of letters, digits and
/// hyphens; no empty labels.
fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn instant(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, h, 0, 0).unwrap()
    }

    /// Registration 08:00..10:00, event 12:00..18:00.
    fn sample_event() -> Event {
        Event::new(
            Uuid::new_v4(),
            "Rust Meetup",
            instant(8),
            instant(10),
            instant(12),
            instant(18),
        )
    }

    #[test]
    fn window_is_half_open() {
        let event = sample_event();
        assert!(!event.is_registration_window_open(instant(8) - Duration::seconds(1)));
        assert!(event.is_registration_window_open(instant(8)));
        assert!(event.is_registration_window_open(instant(9)));
        assert!(!event.is_registration_window_open(instant(10)));
    }

    #[test]
    fn unlimited_event_is_never_full() {
        let mut event = sample_event();
        assert!(!event.is_full(10_000));
        event.max_attendee = Some(0);
        assert!(!event.is_full(10_000));
    }

    #[test]
    fn capped_event_fills_at_capacity() {
        let mut event = sample_event();
        event.max_attendee = Some(3);
        assert!(!event.is_full(2));
        assert!(event.is_full(3));
    }

    #[test]
    fn available_spots_subtract_without_underflow() {
        let mut event = sample_event();
        event.max_attendee = Some(5);
        assert_eq!(event.available_spots(2), 3);
        assert_eq!(event.available_spots(7), 0);
    }

    #[test]
    fn available_spots_unlimited_reports_registered_count() {
        let event = sample_event();
        assert_eq!(event.available_spots(42), 42);
    }

    #[test]
    fn registration_status_open_excludes_closed_and_full() {
        let mut event = sample_event();
        assert!(event.is_registration_status_open());
        event.registration_status = RegistrationStatus::Closed;
        assert!(!event.is_registration_status_open());
        event.registration_status = RegistrationStatus::Full;
        assert!(!event.is_registration_status_open());
    }

    #[test]
    fn public_event_allows_any_domain() {
        let mut event = sample_event();
        event.allowed_email_domains = parse_domain_list("example.com");
        assert!(event.is_email_domain_allowed("someone@elsewhere.org"));
    }

    #[test]
    fn private_event_checks_the_allow_list() {
        let mut event = sample_event();
        event.visibility = Visibility::Private;
        event.allowed_email_domains = parse_domain_list("example.com, ku.th");
        assert!(event.is_email_domain_allowed("user@example.com"));
        assert!(event.is_email_domain_allowed("user@KU.TH"));
        assert!(!event.is_email_domain_allowed("user@notallowed.com"));
    }

    #[test]
    fn private_event_without_domains_allows_everyone() {
        let mut event = sample_event();
        event.visibility = Visibility::Private;
        assert!(event.is_email_domain_allowed("user@anywhere.net"));
    }

    #[test]
    fn malformed_email_is_disallowed() {
        let mut event = sample_event();
        event.visibility = Visibility::Private;
        event.allowed_email_domains = parse_domain_list("example.com");
        assert!(!event.is_email_domain_allowed("not-an-email"));
    }

    #[test]
    fn lifecycle_status_follows_event_window() {
        let mut event = sample_event();
        assert_eq!(event.lifecycle_status(instant(11)), EventStatus::Upcoming);
        assert_eq!(event.lifecycle_status(instant(12)), EventStatus::Ongoing);
        assert_eq!(event.lifecycle_status(instant(18)), EventStatus::Completed);

        assert_eq!(event.refresh_lifecycle_status(instant(13)), EventStatus::Ongoing);
        assert_eq!(event.status, EventStatus::Ongoing);
    }

    #[test]
    fn full_takes_priority_over_window_state() {
        let mut event = sample_event();
        event.max_attendee = Some(2);
        // Window already closed, but the capacity verdict wins.
        assert_eq!(
            event.registration_status_for(instant(11), 2),
            RegistrationStatus::Full
        );
        assert_eq!(
            event.registration_status_for(instant(11), 1),
            RegistrationStatus::Closed
        );
        assert_eq!(
            event.registration_status_for(instant(9), 1),
            RegistrationStatus::Open
        );
    }

    #[test]
    fn registration_status_derivation_is_idempotent() {
        let mut event = sample_event();
        event.max_attendee = Some(10);
        let first = event.refresh_registration_status(instant(9), 4);
        let second = event.refresh_registration_status(instant(9), 4);
        assert_eq!(first, second);
        assert_eq!(event.registration_status, second);
    }

    #[test]
    fn schedule_order_check_covers_all_four_instants() {
        let mut event = sample_event();
        assert!(event.is_schedule_ordered());
        event.end_date_register = instant(13); // after event start
        assert!(!event.is_schedule_ordered());
    }

    #[test]
    fn validate_rejects_inverted_event_dates() {
        let mut event = sample_event();
        event.end_date_event = event.start_date_event;
        assert_eq!(event.validate(), Err(ValidationError::InvalidDateOrder));
    }

    #[test]
    fn validate_rejects_malformed_domains() {
        let mut event = sample_event();
        event.visibility = Visibility::Private;
        event.allowed_email_domains =
            vec!["ku.th".to_string(), "bad domain".to_string(), "a..b".to_string()];
        assert_eq!(
            event.validate(),
            Err(ValidationError::InvalidEmailDomain(
                "bad domain, a..b".to_string()
            ))
        );
    }

    #[test]
    fn validate_accepts_well_formed_private_event() {
        let mut event = sample_event();
        event.visibility = Visibility::Private;
        event.allowed_email_domains = parse_domain_list("example.com, sub-domain.ku.th");
        assert!(event.validate().is_ok());
    }

    #[test]
    fn status_string_roundtrip() {
        for status in &[
            RegistrationStatus::Open,
            RegistrationStatus::Closed,
            RegistrationStatus::Full,
        ] {
            assert_eq!(&RegistrationStatus::from_str(status.as_str()), status);
        }
        for status in &[
            EventStatus::Upcoming,
            EventStatus::Ongoing,
            EventStatus::Completed,
        ] {
            assert_eq!(&EventStatus::from_str(status.as_str()), status);
        }
    }
}
