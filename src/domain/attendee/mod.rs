pub mod model;
pub mod repository;

pub use model::{Attendee, AttendeeStatus};
pub use repository::AttendeeRepository;
