pub mod model;
pub mod repository;

pub use model::{parse_domain_list, Event, EventStatus, RegistrationStatus, Visibility};
pub use repository::EventRepository;
