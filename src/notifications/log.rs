//! Logging notifier
//!
//! Renders each notification into structured log output instead of
//! delivering it. SMTP transport and templating are outside the core; this
//! is the default channel for development and the demo binary.

use async_trait::async_trait;
use tracing::info;

use super::notifier::{Notifier, NotifyError, TicketNotification};
use crate::config::EmailConfig;

pub struct LogNotifier {
    config: EmailConfig,
}

impl LogNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &TicketNotification) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(notification)
            .map_err(|e| NotifyError(format!("failed to encode notification: {e}")))?;

        info!(
            kind = notification.kind.as_str(),
            from = %self.config.from_address,
            to = %notification.recipient,
            subject = %notification.subject(),
            payload = %payload,
            "Notification dispatched"
        );
        Ok(())
    }
}
