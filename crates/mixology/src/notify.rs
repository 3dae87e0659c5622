//! Desktop display of push messages.

use mixology_core::messaging::{CHANNEL_ID, CHANNEL_NAME, Notification, PushMessage};
use tracing::{debug, info};

/// Parses a push payload and shows its notification, if it carries one.
pub fn show_push(payload: &str) -> anyhow::Result<()> {
    let message = PushMessage::from_json(payload)?;

    let Some(notification) = message.notification() else {
        info!(keys = message.data.len(), "Data-only push message, nothing to show");
        return Ok(());
    };

    desktop_notification(&notification).show()?;
    debug!(title = %notification.title, "Notification shown");
    println!("{}: {}", notification.title, notification.body);
    Ok(())
}

fn desktop_notification(notification: &Notification) -> notify_rust::Notification {
    let mut desktop = notify_rust::Notification::new();
    desktop
        .appname(CHANNEL_NAME)
        .summary(&notification.title)
        .body(&notification.body);
    #[cfg(all(unix, not(target_os = "macos")))]
    desktop.hint(notify_rust::Hint::Category(CHANNEL_ID.to_string()));
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    debug!(channel = CHANNEL_ID, "Notification categories are not supported here");
    desktop
}
