pub mod log;
pub mod notifier;

pub use log::LogNotifier;
pub use notifier::{NotificationKind, Notifier, NotifyError, TicketNotification};
