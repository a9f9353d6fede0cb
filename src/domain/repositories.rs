//! Repository provider
//!
//! Bundles the four repositories behind one injectable handle so services
//! take a single collaborator instead of four.

use crate::domain::attendee::AttendeeRepository;
use crate::domain::event::EventRepository;
use crate::domain::organizer::OrganizerRepository;
use crate::domain::ticket::TicketRepository;

pub trait RepositoryProvider: Send + Sync {
    fn events(&self) -> &dyn EventRepository;
    fn tickets(&self) -> &dyn TicketRepository;
    fn attendees(&self) -> &dyn AttendeeRepository;
    fn organizers(&self) -> &dyn OrganizerRepository;
}
