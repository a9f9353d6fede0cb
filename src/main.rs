//! EventEase demo runner.
//!
//! Wires the core services against the in-memory store and walks through a
//! registration day: an organizer publishes an event, attendees register
//! (some are turned away), statuses are derived, a ticket is cancelled and
//! the reminder sweep runs once. Reads configuration from a TOML file
//! (~/.config/eventease/config.toml).

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

use eventease::domain::{
    Attendee, AttendeeRepository, Clock, Event, RepositoryProvider, SystemClock,
};
use eventease::{
    default_config_path, start_reminder_task, AppConfig, EventService, InMemoryStore, LogNotifier,
    OrganizerService, RegistrationService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("EVENTEASE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("🚀 Starting EventEase demo run...");

    // ── Wire services ──────────────────────────────────────────
    let store = Arc::new(InMemoryStore::new());
    let repos = store.clone() as Arc<dyn RepositoryProvider>;
    let clock = Arc::new(SystemClock) as Arc<dyn Clock>;
    let notifier = Arc::new(LogNotifier::new(app_cfg.email.clone()));

    let registration = Arc::new(RegistrationService::new(
        repos.clone(),
        clock.clone(),
        notifier.clone(),
    ));
    let events = EventService::new(repos.clone(), clock.clone());
    let organizers = OrganizerService::new(repos.clone());

    // ── Seed an organizer and an event starting tomorrow ───────
    let ann = seed_attendee(&*store, "ann@ku.th", "Ann", "Arthit", Some("1990-04-12")).await?;
    let profile = organizers.apply(ann.id, "KU Tech Club", "club@ku.th").await?;

    let now = clock.now();
    let mut draft = Event::new(
        profile.id,
        "Intro to Embedded Rust",
        now - Duration::hours(1),
        now + Duration::hours(2),
        now + Duration::days(1),
        now + Duration::days(1) + Duration::hours(6),
    );
    draft.description = "Hands-on workshop, boards provided.".to_string();
    draft.address = Some("Engineering Building 3".to_string());
    draft.max_attendee = Some(2);
    let event = events.create_event(draft).await?;

    // ── Registrations: two accepted, three turned away ─────────
    let alice = seed_attendee(&*store, "alice@example.com", "Alice", "Anderson", Some("2000-06-15")).await?;
    let bob = seed_attendee(&*store, "bob@example.com", "Bob", "Brown", None).await?;
    let carol = seed_attendee(&*store, "carol@example.com", "Carol", "Chen", Some("1998-02-02")).await?;
    let dave = seed_attendee(&*store, "dave@example.com", "Dave", "Diaz", Some("2001-09-09")).await?;

    let alice_ticket = registration.register(event.id, alice.id).await?;
    info!(ticket = %alice_ticket.ticket_number, "Alice holds a ticket");

    for (name, attendee_id) in [("Bob", bob.id), ("Ann", ann.id)] {
        match registration.register(event.id, attendee_id).await {
            Ok(ticket) => info!(ticket = %ticket.ticket_number, "{name} holds a ticket"),
            Err(e) => warn!(attendee = name, reason = %e, "Registration rejected"),
        }
    }

    let carol_ticket = registration.register(event.id, carol.id).await?;
    info!(ticket = %carol_ticket.ticket_number, "Carol holds a ticket");

    // Capacity is 2 and both spots are taken.
    if let Err(e) = registration.register(event.id, dave.id).await {
        warn!(attendee = "Dave", reason = %e, "Registration rejected");
    }

    let (status, registration_status) = events.derive_and_persist_statuses(event.id).await?;
    info!(%status, %registration_status, "Event statuses derived");

    // ── Cancellation frees a spot ──────────────────────────────
    registration.cancel_and_remove(carol_ticket.id, carol.id).await?;
    let (_, registration_status) = events.derive_and_persist_statuses(event.id).await?;
    info!(%registration_status, "Statuses after cancellation");

    // ── Reminder sweep for tomorrow's events ───────────────────
    let sent = registration.send_due_reminders().await?;
    info!(count = sent, "Reminder sweep finished");

    // Run one interval of the background task, then shut it down.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    start_reminder_task(
        registration.clone(),
        app_cfg.reminder.check_interval_secs,
        shutdown_rx,
    );
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    let _ = shutdown_tx.send(true);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    info!("👋 EventEase demo run complete");
    Ok(())
}

async fn seed_attendee(
    store: &InMemoryStore,
    email: &str,
    first: &str,
    last: &str,
    birth_date: Option<&str>,
) -> Result<Attendee, Box<dyn std::error::Error>> {
    let mut attendee = Attendee::new(email, first, last);
    attendee.birth_date = match birth_date {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };
    AttendeeRepository::save(store, attendee.clone()).await?;
    Ok(attendee)
}
