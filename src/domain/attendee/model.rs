//! Attendee domain entity

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

/// Account role marker. An attendee who applies as an organizer is flipped
/// to `Organizer`; the two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeStatus {
    Attendee,
    Organizer,
}

impl AttendeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attendee => "Attendee",
            Self::Organizer => "Organizer",
        }
    }
}

impl Default for AttendeeStatus {
    fn default() -> Self {
        Self::Attendee
    }
}

impl std::fmt::Display for AttendeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user who can browse events and hold tickets.
#[derive(Debug, Clone)]
pub struct Attendee {
    pub id: Uuid,
    /// Unique login/contact address; domain restrictions check against it
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Absent until the user fills in account information; required for any
    /// age-gated registration
    pub birth_date: Option<NaiveDate>,
    pub status: AttendeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Attendee {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            status: AttendeeStatus::Attendee,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`: calendar-year difference, minus one
    /// when the birthday has not come around yet this year. `None` without
    /// a birth date. A birth date in the future yields a negative age, which
    /// no age requirement accepts.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?;
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }
}
