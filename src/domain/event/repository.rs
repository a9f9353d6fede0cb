//! Event repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::Event;
use crate::domain::DomainResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Save a new event
    async fn save(&self, event: Event) -> DomainResult<()>;

    /// Find event by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Event>>;

    /// Update an existing event
    async fn update(&self, event: Event) -> DomainResult<()>;

    /// Delete an event by ID. Deletion cascades to the event's tickets.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// All events belonging to an organizer
    async fn list_by_organizer(&self, organizer_id: Uuid) -> DomainResult<Vec<Event>>;

    /// Events with `start_date_event` in `[from, to)`; the reminder sweep
    /// uses this for its next-day scan
    async fn find_starting_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Event>>;
}
