pub mod model;
pub mod repository;

pub use model::{generate_ticket_number, Ticket, TicketStatus, TICKET_NUMBER_PREFIX};
pub use repository::TicketRepository;
