//! Background task that periodically sends next-day event reminders.
//!
//! Runs in a tokio::spawn loop, sweeping on a fixed interval for events
//! starting tomorrow and mailing every armed ticket.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{info, warn};

use super::registration::RegistrationService;

/// Start the reminder background task.
///
/// The task calls `send_due_reminders` every `check_interval_secs` until a
/// value is sent on `shutdown`. Sweep errors are logged and the loop keeps
/// going.
pub fn start_reminder_task(
    service: Arc<RegistrationService>,
    check_interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "Reminder task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match service.send_due_reminders().await {
                        Ok(0) => {}
                        Ok(sent) => info!(count = sent, "Reminders sent"),
                        Err(e) => warn!(error = %e, "Reminder sweep error"),
                    }
                }
                _ = shutdown.changed() => {
                    info!("Reminder task shutting down");
                    break;
                }
            }
        }

        info!("Reminder task stopped");
    });
}
