pub mod events;
pub mod organizers;
pub mod registration;
pub mod reminder;

pub use events::EventService;
pub use organizers::OrganizerService;
pub use registration::RegistrationService;
pub use reminder::start_reminder_task;
