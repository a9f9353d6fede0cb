//! Attendee repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Attendee;
use crate::domain::DomainResult;

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    /// Save a new attendee. Fails with `Conflict` when the email is taken.
    async fn save(&self, attendee: Attendee) -> DomainResult<()>;

    /// Find attendee by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Attendee>>;

    /// Find attendee by email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Attendee>>;

    /// Update an existing attendee
    async fn update(&self, attendee: Attendee) -> DomainResult<()>;

    /// Delete an attendee by ID
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
