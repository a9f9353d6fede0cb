//! # EventEase Core
//!
//! Registration engine for an event-management backend: organizers publish
//! events, attendees register for them, and every registration attempt runs
//! through an ordered set of eligibility guards (capacity, registration
//! window, visibility/domain restriction, age requirement, organizer
//! self-registration, duplicate tickets).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and the clock
//! - **application**: Registration policy, event/organizer services and the
//!   reminder sweep
//! - **notifications**: Notification trigger interface and the logging channel
//! - **infrastructure**: In-memory persistence for development and tests
//!
//! The core is transport-agnostic: HTTP endpoints, auth and file storage
//! live outside this crate and talk to it through the services.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod notifications;

pub use config::{default_config_path, AppConfig};

// Re-export the service entry points
pub use application::{start_reminder_task, EventService, OrganizerService, RegistrationService};

// Re-export persistence and notification defaults
pub use infrastructure::InMemoryStore;
pub use notifications::LogNotifier;
