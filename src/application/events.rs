//! Event business logic

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Clock, DomainError, DomainResult, Event, EventRepository, EventStatus, OrganizerRepository,
    RegistrationStatus, RepositoryProvider, TicketRepository, ValidationError,
};

/// Service for event creation and status derivation.
pub struct EventService {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl EventService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Create an event. The owning organizer must exist, the four schedule
    /// instants must be in order and the entity invariants must hold. The
    /// initial statuses are derived before the first save.
    pub async fn create_event(&self, mut event: Event) -> DomainResult<Event> {
        self.repos
            .organizers()
            .find_by_id(event.organizer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Organizer", event.organizer_id))?;

        if !event.is_schedule_ordered() {
            return Err(ValidationError::InvalidSchedule.into());
        }
        event.validate()?;

        let now = self.clock.now();
        event.refresh_lifecycle_status(now);
        event.refresh_registration_status(now, 0);

        self.repos.events().save(event.clone()).await?;
        info!(event = %event.event_name, organizer = %event.organizer_id, "Event created");
        Ok(event)
    }

    /// Recompute both derived statuses from the clock and the current
    /// active-ticket count, and write the event back. The persisted fields
    /// are presentation hints; this is the write that keeps them fresh.
    pub async fn derive_and_persist_statuses(
        &self,
        event_id: Uuid,
    ) -> DomainResult<(EventStatus, RegistrationStatus)> {
        let mut event = self
            .repos
            .events()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", event_id))?;
        let active = self.repos.tickets().count_active_for_event(event_id).await?;

        let now = self.clock.now();
        let status = event.refresh_lifecycle_status(now);
        let registration_status = event.refresh_registration_status(now, active);
        self.repos.events().update(event).await?;

        Ok((status, registration_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::domain::{
        parse_domain_list, Attendee, AttendeeRepository, FixedClock, Organizer,
        OrganizerRepository, Ticket, Visibility,
    };
    use crate::infrastructure::InMemoryStore;

    fn instant(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, h, 0, 0).unwrap()
    }

    fn service(store: &Arc<InMemoryStore>, clock: &Arc<FixedClock>) -> EventService {
        EventService::new(
            store.clone() as Arc<dyn RepositoryProvider>,
            clock.clone() as Arc<dyn Clock>,
        )
    }

    async fn seed_organizer(store: &InMemoryStore) -> Organizer {
        let organizer = Organizer::new(Uuid::new_v4(), "Robotics Club", "robots@ku.th");
        OrganizerRepository::save(store, organizer.clone())
            .await
            .unwrap();
        organizer
    }

    fn draft_event(organizer_id: Uuid) -> Event {
        Event::new(
            organizer_id,
            "Robot Expo",
            instant(8),
            instant(10),
            instant(12),
            instant(18),
        )
    }

    #[tokio::test]
    async fn create_event_persists_with_derived_statuses() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));
        let organizer = seed_organizer(&store).await;

        let created = service(&store, &clock)
            .create_event(draft_event(organizer.id))
            .await
            .unwrap();
        assert_eq!(created.status, EventStatus::Upcoming);
        assert_eq!(created.registration_status, RegistrationStatus::Open);
        assert!(store
            .events()
            .find_by_id(created.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn create_event_requires_an_existing_organizer() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));

        let err = service(&store, &clock)
            .create_event(draft_event(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Organizer", .. }));
    }

    #[tokio::test]
    async fn create_event_rejects_unordered_schedule() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));
        let organizer = seed_organizer(&store).await;

        let mut event = draft_event(organizer.id);
        event.end_date_register = instant(13); // registration past event start
        let err = service(&store, &clock).create_event(event).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(ValidationError::InvalidSchedule)
        );
    }

    #[tokio::test]
    async fn create_event_rejects_bad_domains() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));
        let organizer = seed_organizer(&store).await;

        let mut event = draft_event(organizer.id);
        event.visibility = Visibility::Private;
        event.allowed_email_domains = vec!["not a domain!".to_string()];
        let err = service(&store, &clock).create_event(event).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidEmailDomain(_))
        ));

        let mut event = draft_event(organizer.id);
        event.visibility = Visibility::Private;
        event.allowed_email_domains = parse_domain_list("ku.th");
        assert!(service(&store, &clock).create_event(event).await.is_ok());
    }

    #[tokio::test]
    async fn statuses_follow_clock_and_capacity() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));
        let organizer = seed_organizer(&store).await;

        let mut event = draft_event(organizer.id);
        event.max_attendee = Some(1);
        let event = service(&store, &clock).create_event(event).await.unwrap();

        // Fill the single spot directly.
        let attendee = Attendee::new("alice@example.com", "Alice", "Anderson");
        AttendeeRepository::save(&*store, attendee.clone())
            .await
            .unwrap();
        store
            .tickets()
            .save(Ticket::new(event.id, attendee.id, instant(9)))
            .await
            .unwrap();

        let svc = service(&store, &clock);
        let (status, registration) = svc.derive_and_persist_statuses(event.id).await.unwrap();
        assert_eq!(status, EventStatus::Upcoming);
        assert_eq!(registration, RegistrationStatus::Full);

        // Event in progress, spot freed: Ongoing and Closed (window over).
        store.tickets().delete(
            store.tickets().list_for_event(event.id).await.unwrap()[0].id,
        )
        .await
        .unwrap();
        clock.set(instant(13));
        let (status, registration) = svc.derive_and_persist_statuses(event.id).await.unwrap();
        assert_eq!(status, EventStatus::Ongoing);
        assert_eq!(registration, RegistrationStatus::Closed);

        let stored = store.events().find_by_id(event.id).await.unwrap().unwrap();
        assert_eq!(stored.status, EventStatus::Ongoing);
        assert_eq!(stored.registration_status, RegistrationStatus::Closed);
    }

    #[tokio::test]
    async fn derivation_is_idempotent_for_a_pinned_clock() {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::new(instant(9)));
        let organizer = seed_organizer(&store).await;
        let event = service(&store, &clock)
            .create_event(draft_event(organizer.id))
            .await
            .unwrap();

        let svc = service(&store, &clock);
        let first = svc.derive_and_persist_statuses(event.id).await.unwrap();
        let second = svc.derive_and_persist_statuses(event.id).await.unwrap();
        assert_eq!(first, second);
    }
}
