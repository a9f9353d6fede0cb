//! Registration business logic
//!
//! Single entry point for "can attendee X register for event Y" and for the
//! two cancellation flows. The guard order in `register` is fixed: the
//! first failing check determines the error the caller sees.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::ticket::model::generate_ticket_number;
use crate::domain::{
    Attendee, AttendeeRepository, Clock, DomainError, DomainResult, Event, EventRepository,
    OrganizerRepository, RegistrationDenied, RepositoryProvider, Ticket, TicketRepository,
    Visibility,
};
use crate::notifications::{NotificationKind, Notifier, TicketNotification};

/// How many ticket numbers to try before giving up. The store's uniqueness
/// index remains the final arbiter either way.
const TICKET_NUMBER_ATTEMPTS: u32 = 5;

/// Service for registration, cancellation and reminder operations.
pub struct RegistrationService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repos,
            clock,
            notifier,
        }
    }

    /// Register an attendee for an event.
    ///
    /// Guard order: capacity, registration window, registration status,
    /// domain restriction, birth date, age requirement, self-registration,
    /// duplicate registration. On success the persisted ticket is returned
    /// and a confirmation notification is sent best-effort; no ticket row
    /// exists after any rejection.
    pub async fn register(&self, event_id: Uuid, attendee_id: Uuid) -> DomainResult<Ticket> {
        let now = self.clock.now();
        let event = self
            .repos
            .events()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", event_id))?;
        let attendee = self
            .repos
            .attendees()
            .find_by_id(attendee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendee", attendee_id))?;

        let active = self.repos.tickets().count_active_for_event(event_id).await?;
        validate_event_registration(&event, &attendee, active, now)?;

        let mut ticket = Ticket::new(event.id, attendee.id, now);

        if !ticket.is_age_eligible(&event, &attendee, now.date_naive()) {
            return Err(RegistrationDenied::AgeRequirementNotMet {
                required: event.min_age_requirement,
            }
            .into());
        }

        if self.is_self_registration(&event, attendee.id).await? {
            return Err(RegistrationDenied::OrganizerSelfRegistration.into());
        }

        if self
            .repos
            .tickets()
            .exists_active(event.id, attendee.id)
            .await?
        {
            return Err(RegistrationDenied::DuplicateRegistration.into());
        }

        self.assign_unique_ticket_number(&mut ticket).await?;

        let mut ticket = match self.repos.tickets().save(ticket).await {
            Ok(ticket) => ticket,
            // The check above and this insert are not atomic; a concurrent
            // duplicate lands here via the uniqueness constraint.
            Err(DomainError::Conflict(_)) => {
                return Err(RegistrationDenied::DuplicateRegistration.into())
            }
            Err(e) => return Err(e),
        };

        // Confirmation is best-effort: the registration stands even when
        // the email cannot be sent. Success arms the reminder flag.
        let notification =
            build_notification(NotificationKind::Registration, &event, &attendee, &ticket);
        match self.notifier.notify(&notification).await {
            Ok(()) => {
                ticket.email_sent = true;
                self.repos.tickets().update(ticket.clone()).await?;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    ticket_number = %ticket.ticket_number,
                    "Failed to send registration confirmation"
                );
            }
        }

        info!(
            event = %event.event_name,
            attendee = %attendee.email,
            ticket_number = %ticket.ticket_number,
            "Registration accepted"
        );
        Ok(ticket)
    }

    /// Cancel a ticket by deleting the row.
    ///
    /// The cancellation email goes out first; if it cannot be sent the
    /// ticket is left untouched and `NotificationFailed` is returned. The
    /// lookup is ownership-scoped: a ticket belonging to someone else is
    /// reported as not found.
    pub async fn cancel_and_remove(&self, ticket_id: Uuid, attendee_id: Uuid) -> DomainResult<()> {
        let ticket = self.owned_ticket(ticket_id, attendee_id).await?;
        let (event, attendee) = self.load_parents(&ticket).await?;

        let notification =
            build_notification(NotificationKind::Cancellation, &event, &attendee, &ticket);
        if let Err(e) = self.notifier.notify(&notification).await {
            error!(error = %e, ticket_number = %ticket.ticket_number, "Failed to send cancellation email");
            return Err(DomainError::NotificationFailed {
                kind: NotificationKind::Cancellation,
                reason: e.to_string(),
            });
        }

        self.repos.tickets().delete(ticket.id).await?;
        info!(
            event = %event.event_name,
            ticket_number = %ticket.ticket_number,
            "Ticket cancelled and removed"
        );
        Ok(())
    }

    /// Cancel a ticket in place, keeping the row for history. No
    /// notification is sent on this path.
    pub async fn mark_cancelled(&self, ticket_id: Uuid, attendee_id: Uuid) -> DomainResult<Ticket> {
        let mut ticket = self.owned_ticket(ticket_id, attendee_id).await?;
        ticket.mark_cancelled(self.clock.now())?;
        self.repos.tickets().update(ticket.clone()).await?;
        info!(ticket_number = %ticket.ticket_number, "Ticket marked cancelled");
        Ok(ticket)
    }

    /// Send reminders for every ticket of an event starting tomorrow whose
    /// reminder flag is armed. Returns how many went out. Delivery failures
    /// are logged and skipped; the flag stays armed for the next sweep.
    pub async fn send_due_reminders(&self) -> DomainResult<usize> {
        let now = self.clock.now();
        let tomorrow = (now + chrono::Duration::days(1)).date_naive();
        let from = tomorrow.and_time(chrono::NaiveTime::MIN).and_utc();
        let to = from + chrono::Duration::days(1);

        let events = self.repos.events().find_starting_between(from, to).await?;
        let mut sent = 0;
        for event in events {
            for ticket in self.repos.tickets().list_for_event(event.id).await? {
                if !ticket.email_sent {
                    continue;
                }
                if self.send_reminder_for(ticket, &event).await? {
                    sent += 1;
                }
            }
        }
        Ok(sent)
    }

    async fn send_reminder_for(&self, mut ticket: Ticket, event: &Event) -> DomainResult<bool> {
        let attendee = self
            .repos
            .attendees()
            .find_by_id(ticket.attendee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendee", ticket.attendee_id))?;

        let notification =
            build_notification(NotificationKind::Reminder, event, &attendee, &ticket);
        match self.notifier.notify(&notification).await {
            Ok(()) => {
                // Disarm so the next sweep does not mail twice.
                ticket.email_sent = false;
                self.repos.tickets().update(ticket).await?;
                Ok(true)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    ticket_number = %ticket.ticket_number,
                    "Failed to send reminder"
                );
                Ok(false)
            }
        }
    }

    async fn owned_ticket(&self, ticket_id: Uuid, attendee_id: Uuid) -> DomainResult<Ticket> {
        self.repos
            .tickets()
            .find_for_attendee(ticket_id, attendee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", ticket_id))
    }

    async fn load_parents(&self, ticket: &Ticket) -> DomainResult<(Event, Attendee)> {
        let event = self
            .repos
            .events()
            .find_by_id(ticket.event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", ticket.event_id))?;
        let attendee = self
            .repos
            .attendees()
            .find_by_id(ticket.attendee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendee", ticket.attendee_id))?;
        Ok((event, attendee))
    }

    async fn is_self_registration(&self, event: &Event, attendee_id: Uuid) -> DomainResult<bool> {
        Ok(match self.repos.organizers().find_by_user(attendee_id).await? {
            Some(organizer) => organizer.id == event.organizer_id,
            None => false,
        })
    }

    async fn assign_unique_ticket_number(&self, ticket: &mut Ticket) -> DomainResult<()> {
        for _ in 0..TICKET_NUMBER_ATTEMPTS {
            if self
                .repos
                .tickets()
                .find_by_ticket_number(&ticket.ticket_number)
                .await?
                .is_none()
            {
                return Ok(());
            }
            ticket.ticket_number = generate_ticket_number();
        }
        Err(DomainError::Unexpected(format!(
            "no unique ticket number after {TICKET_NUMBER_ATTEMPTS} attempts"
        )))
    }
}

/// Guards 1–5: everything that can be answered from the event, the
/// attendee and the current active count.
fn validate_event_registration(
    event: &Event,
    attendee: &Attendee,
    active_count: u32,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), RegistrationDenied> {
    if event.is_full(active_count) {
        return Err(RegistrationDenied::CapacityExceeded);
    }

    if !event.is_registration_window_open(now) {
        return Err(RegistrationDenied::RegistrationWindowClosed);
    }

    if !event.is_registration_status_open() {
        return Err(RegistrationDenied::RegistrationStatusNotOpen {
            status: event.registration_status.as_str().to_lowercase(),
        });
    }

    if event.visibility == Visibility::Private && !event.is_email_domain_allowed(&attendee.email) {
        return Err(RegistrationDenied::DomainNotAuthorized);
    }

    if attendee.birth_date.is_none() {
        return Err(RegistrationDenied::BirthDateMissing);
    }

    Ok(())
}

fn build_notification(
    kind: NotificationKind,
    event: &Event,
    attendee: &Attendee,
    ticket: &Ticket,
) -> TicketNotification {
    TicketNotification {
        kind,
        recipient: attendee.email.clone(),
        attendee_name: attendee.full_name(),
        event_name: event.event_name.clone(),
        event_start: event.start_date_event,
        event_address: event.address.clone(),
        ticket_number: ticket.ticket_number.clone(),
    }
}

// ── Tests ──────────────────────────────────────────────────────
