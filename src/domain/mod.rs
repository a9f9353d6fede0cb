pub mod attendee;
pub mod clock;
pub mod error;
pub mod event;
pub mod organizer;
pub mod repositories;
pub mod ticket;

// Re-export commonly used types
pub use attendee::{Attendee, AttendeeRepository, AttendeeStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult, RegistrationDenied, ValidationError};
pub use event::{
    parse_domain_list, Event, EventRepository, EventStatus, RegistrationStatus, Visibility,
};
pub use organizer::{Organizer, OrganizerRepository, VerificationStatus};
pub use repositories::RepositoryProvider;
pub use ticket::{generate_ticket_number, Ticket, TicketRepository, TicketStatus};
