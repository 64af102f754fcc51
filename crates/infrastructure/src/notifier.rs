//! Log-backed Notifier for headless runs

use application::{Notification, NotificationLevel, Notifier};
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Notifier that forwards notifications to the tracing pipeline
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => {
                info!("{}: {}", notification.title, notification.message)
            }
            NotificationLevel::Warning => {
                warn!("{}: {}", notification.title, notification.message)
            }
            NotificationLevel::Error => {
                error!("{}: {}", notification.title, notification.message)
            }
        }
    }
}
