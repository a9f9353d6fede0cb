//! Organizer business logic

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    AttendeeRepository, AttendeeStatus, DomainError, DomainResult, Organizer, OrganizerRepository,
    RepositoryProvider,
};

/// Service for organizer applications.
pub struct OrganizerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OrganizerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Turn an attendee account into an organizer. One profile per user,
    /// globally unique organizer name; the attendee's role marker flips to
    /// Organizer on success.
    pub async fn apply(
        &self,
        user_id: Uuid,
        organizer_name: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Organizer> {
        let organizer_name = organizer_name.into();

        let mut attendee = self
            .repos
            .attendees()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Attendee", user_id))?;

        if self.repos.organizers().find_by_user(user_id).await?.is_some() {
            return Err(DomainError::Conflict(
                "User is already an organizer.".to_string(),
            ));
        }
        if self
            .repos
            .organizers()
            .find_by_name(&organizer_name)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Organizer name is already taken.".to_string(),
            ));
        }

        let organizer = Organizer::new(user_id, organizer_name, email);
        self.repos.organizers().save(organizer.clone()).await?;

        attendee.status = AttendeeStatus::Organizer;
        self.repos.attendees().update(attendee).await?;

        info!(organizer = %organizer.organizer_name, user = %user_id, "Organizer application accepted");
        Ok(organizer)
    }
}
