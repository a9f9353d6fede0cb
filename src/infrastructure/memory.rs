//! In-memory persistence
//!
//! DashMap-backed implementation of the four repositories for development
//! and testing. The uniqueness rules a relational schema would carry —
//! one ticket per `(event, attendee)` pair, unique ticket numbers, unique
//! organizer names, one organizer profile per user, unique attendee emails
//! — are enforced here with secondary indexes, and ownership cascades
//! (organizer → events → tickets) are applied on delete.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    Attendee, AttendeeRepository, DomainError, DomainResult, Event, EventRepository, Organizer,
    OrganizerRepository, RepositoryProvider, Ticket, TicketRepository, TicketStatus,
};

/// In-memory store implementing every repository plus `RepositoryProvider`.
#[derive(Default)]
pub struct InMemoryStore {
    events: DashMap<Uuid, Event>,
    tickets: DashMap<Uuid, Ticket>,
    attendees: DashMap<Uuid, Attendee>,
    organizers: DashMap<Uuid, Organizer>,

    // Uniqueness indexes
    ticket_by_pair: DashMap<(Uuid, Uuid), Uuid>,
    ticket_by_number: DashMap<String, Uuid>,
    organizer_by_user: DashMap<Uuid, Uuid>,
    organizer_by_name: DashMap<String, Uuid>,
    attendee_by_email: DashMap<String, Uuid>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_ticket_entry(&self, id: Uuid) -> Option<Ticket> {
        let (_, ticket) = self.tickets.remove(&id)?;
        self.ticket_by_pair
            .remove(&(ticket.event_id, ticket.attendee_id));
        self.ticket_by_number.remove(&ticket.ticket_number);
        Some(ticket)
    }

    fn remove_event_entry(&self, id: Uuid) -> Option<Event> {
        let (_, event) = self.events.remove(&id)?;
        // Tickets do not outlive their event.
        let orphaned: Vec<Uuid> = self
            .tickets
            .iter()
            .filter(|t| t.event_id == id)
            .map(|t| t.id)
            .collect();
        for ticket_id in orphaned {
            self.remove_ticket_entry(ticket_id);
        }
        Some(event)
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn save(&self, event: Event) -> DomainResult<()> {
        if self.events.contains_key(&event.id) {
            return Err(DomainError::Conflict(format!("event {}", event.id)));
        }
        self.events.insert(event.id, event);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Event>> {
        Ok(self.events.get(&id).map(|e| e.clone()))
    }

    async fn update(&self, event: Event) -> DomainResult<()> {
        if !self.events.contains_key(&event.id) {
            return Err(DomainError::not_found("Event", event.id));
        }
        self.events.insert(event.id, event);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.remove_event_entry(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Event", id))
    }

    async fn list_by_organizer(&self, organizer_id: Uuid) -> DomainResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.organizer_id == organizer_id)
            .map(|e| e.clone())
            .collect())
    }

    async fn find_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| from <= e.start_date_event && e.start_date_event < to)
            .map(|e| e.clone())
            .collect())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn save(&self, ticket: Ticket) -> DomainResult<Ticket> {
        let pair = (ticket.event_id, ticket.attendee_id);
        if self.ticket_by_pair.contains_key(&pair) {
            return Err(DomainError::Conflict(format!(
                "ticket for event {} and attendee {}",
                ticket.event_id, ticket.attendee_id
            )));
        }
        if self.ticket_by_number.contains_key(&ticket.ticket_number) {
            return Err(DomainError::Conflict(format!(
                "ticket number {}",
                ticket.ticket_number
            )));
        }
        self.ticket_by_pair.insert(pair, ticket.id);
        self.ticket_by_number
            .insert(ticket.ticket_number.clone(), ticket.id);
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Ticket>> {
        Ok(self.tickets.get(&id).map(|t| t.clone()))
    }

    async fn find_for_attendee(
        &self,
        id: Uuid,
        attendee_id: Uuid,
    ) -> DomainResult<Option<Ticket>> {
        Ok(self
            .tickets
            .get(&id)
            .filter(|t| t.attendee_id == attendee_id)
            .map(|t| t.clone()))
    }

    async fn find_by_ticket_number(&self, ticket_number: &str) -> DomainResult<Option<Ticket>> {
        Ok(self
            .ticket_by_number
            .get(ticket_number)
            .and_then(|id| self.tickets.get(&id).map(|t| t.clone())))
    }

    async fn update(&self, ticket: Ticket) -> DomainResult<()> {
        if !self.tickets.contains_key(&ticket.id) {
            return Err(DomainError::not_found("Ticket", ticket.id));
        }
        self.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.remove_ticket_entry(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Ticket", id))
    }

    async fn count_active_for_event(&self, event_id: Uuid) -> DomainResult<u32> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.event_id == event_id && t.status == TicketStatus::Active)
            .count() as u32)
    }

    async fn exists_active(&self, event_id: Uuid, attendee_id: Uuid) -> DomainResult<bool> {
        Ok(self.tickets.iter().any(|t| {
            t.event_id == event_id
                && t.attendee_id == attendee_id
                && t.status == TicketStatus::Active
        }))
    }

    async fn list_for_event(&self, event_id: Uuid) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.event_id == event_id)
            .map(|t| t.clone())
            .collect())
    }

    async fn list_for_attendee(&self, attendee_id: Uuid) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.attendee_id == attendee_id)
            .map(|t| t.clone())
            .collect())
    }
}

#[async_trait]
impl AttendeeRepository for InMemoryStore {
    async fn save(&self, attendee: Attendee) -> DomainResult<()> {
        if self.attendee_by_email.contains_key(&attendee.email) {
            return Err(DomainError::Conflict(format!(
                "attendee email {}",
                attendee.email
            )));
        }
        self.attendee_by_email
            .insert(attendee.email.clone(), attendee.id);
        self.attendees.insert(attendee.id, attendee);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Attendee>> {
        Ok(self.attendees.get(&id).map(|a| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Attendee>> {
        Ok(self
            .attendee_by_email
            .get(email)
            .and_then(|id| self.attendees.get(&id).map(|a| a.clone())))
    }

    async fn update(&self, attendee: Attendee) -> DomainResult<()> {
        let Some(existing) = self.attendees.get(&attendee.id).map(|a| a.clone()) else {
            return Err(DomainError::not_found("Attendee", attendee.id));
        };
        if existing.email != attendee.email {
            self.attendee_by_email.remove(&existing.email);
            self.attendee_by_email
                .insert(attendee.email.clone(), attendee.id);
        }
        self.attendees.insert(attendee.id, attendee);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let (_, attendee) = self
            .attendees
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Attendee", id))?;
        self.attendee_by_email.remove(&attendee.email);
        Ok(())
    }
}

#[async_trait]
impl OrganizerRepository for InMemoryStore {
    async fn save(&self, organizer: Organizer) -> DomainResult<()> {
        if self.organizer_by_name.contains_key(&organizer.organizer_name) {
            return Err(DomainError::Conflict(format!(
                "organizer name {}",
                organizer.organizer_name
            )));
        }
        if self.organizer_by_user.contains_key(&organizer.user_id) {
            return Err(DomainError::Conflict(format!(
                "organizer profile for user {}",
                organizer.user_id
            )));
        }
        self.organizer_by_name
            .insert(organizer.organizer_name.clone(), organizer.id);
        self.organizer_by_user.insert(organizer.user_id, organizer.id);
        self.organizers.insert(organizer.id, organizer);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Organizer>> {
        Ok(self.organizers.get(&id).map(|o| o.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<Organizer>> {
        Ok(self
            .organizer_by_user
            .get(&user_id)
            .and_then(|id| self.organizers.get(&id).map(|o| o.clone())))
    }

    async fn find_by_name(&self, organizer_name: &str) -> DomainResult<Option<Organizer>> {
        Ok(self
            .organizer_by_name
            .get(organizer_name)
            .and_then(|id| self.organizers.get(&id).map(|o| o.clone())))
    }

    async fn update(&self, organizer: Organizer) -> DomainResult<()> {
        let Some(existing) = self.organizers.get(&organizer.id).map(|o| o.clone()) else {
            return Err(DomainError::not_found("Organizer", organizer.id));
        };
        if existing.organizer_name != organizer.organizer_name {
            self.organizer_by_name.remove(&existing.organizer_name);
            self.organizer_by_name
                .insert(organizer.organizer_name.clone(), organizer.id);
        }
        self.organizers.insert(organizer.id, organizer);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let (_, organizer) = self
            .organizers
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Organizer", id))?;
        self.organizer_by_name.remove(&organizer.organizer_name);
        self.organizer_by_user.remove(&organizer.user_id);
        // Events are exclusively owned; take them and their tickets along.
        let owned: Vec<Uuid> = self
            .events
            .iter()
            .filter(|e| e.organizer_id == id)
            .map(|e| e.id)
            .collect();
        for event_id in owned {
            self.remove_event_entry(event_id);
        }
        Ok(())
    }
}

impl RepositoryProvider for InMemoryStore {
    fn events(&self) -> &dyn EventRepository {
        self
    }

    fn tickets(&self) -> &dyn TicketRepository {
        self
    }

    fn attendees(&self) -> &dyn AttendeeRepository {
        self
    }

    fn organizers(&self) -> &dyn OrganizerRepository {
        self
    }
}
