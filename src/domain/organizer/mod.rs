pub mod model;
pub mod repository;

pub use model::{Organizer, VerificationStatus};
pub use repository::OrganizerRepository;
