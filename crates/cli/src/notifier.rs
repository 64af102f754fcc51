//! Terminal notifier for the interactive session

use application::{Notification, NotificationLevel, Notifier};
use async_trait::async_trait;
use console::style;

/// Renders notifications as styled terminal lines
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notification: Notification) {
        let line = format!("{}: {}", notification.title, notification.message);
        match notification.level {
            NotificationLevel::Info => println!("{} {}", style("✔").green(), line),
            NotificationLevel::Warning => println!("{} {}", style("!").yellow(), line),
            NotificationLevel::Error => println!("{} {}", style("✘").red(), line),
        }
    }
}
