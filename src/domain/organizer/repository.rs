//! Organizer repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Organizer;
use crate::domain::DomainResult;

#[async_trait]
pub trait OrganizerRepository: Send + Sync {
    /// Save a new organizer. Fails with `Conflict` when the organizer name
    /// is taken or the user already has a profile.
    async fn save(&self, organizer: Organizer) -> DomainResult<()>;

    /// Find organizer by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Organizer>>;

    /// Find the organizer profile belonging to a user account
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Option<Organizer>>;

    /// Find organizer by display name (exact match)
    async fn find_by_name(&self, organizer_name: &str) -> DomainResult<Option<Organizer>>;

    /// Update an existing organizer
    async fn update(&self, organizer: Organizer) -> DomainResult<()>;

    /// Delete an organizer. Deletion cascades to the organizer's events
    /// and their tickets.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
