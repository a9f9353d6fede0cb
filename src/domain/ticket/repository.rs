//! Ticket repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Ticket;
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Save a new ticket. Fails with `Conflict` when a ticket for the same
    /// `(event, attendee)` pair already exists — regardless of its status —
    /// or when the ticket number is taken. This constraint, not the
    /// application-level duplicate check, is the source of truth under
    /// concurrent registration.
    async fn save(&self, ticket: Ticket) -> DomainResult<Ticket>;

    /// Find ticket by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Ticket>>;

    /// Ownership-scoped lookup: the ticket only if it belongs to the given
    /// attendee. "Not owned" and "does not exist" are indistinguishable.
    async fn find_for_attendee(
        &self,
        id: Uuid,
        attendee_id: Uuid,
    ) -> DomainResult<Option<Ticket>>;

    /// Find ticket by its opaque ticket number
    async fn find_by_ticket_number(&self, ticket_number: &str) -> DomainResult<Option<Ticket>>;

    /// Update an existing ticket
    async fn update(&self, ticket: Ticket) -> DomainResult<()>;

    /// Hard-delete a ticket. Cascades to neither parent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Number of ACTIVE tickets for an event
    async fn count_active_for_event(&self, event_id: Uuid) -> DomainResult<u32>;

    /// Whether an ACTIVE ticket exists for the `(event, attendee)` pair
    async fn exists_active(&self, event_id: Uuid, attendee_id: Uuid) -> DomainResult<bool>;

    /// All tickets for an event, any status
    async fn list_for_event(&self, event_id: Uuid) -> DomainResult<Vec<Ticket>>;

    /// All tickets held by an attendee, any status
    async fn list_for_attendee(&self, attendee_id: Uuid) -> DomainResult<Vec<Ticket>>;
}
