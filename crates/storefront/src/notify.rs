//! One-shot, auto-dismissing notifications.
//!
//! The toast widget itself belongs to whatever front end hosts the
//! controller; this module only describes what to show and hands it over
//! through the [`Notifier`] trait.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How long a notification stays on screen.
pub const AUTO_DISMISS: Duration = Duration::from_millis(1500);

/// Success or failure styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Where the toast appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPosition {
    Center,
    /// Top corner, used for add-to-cart so the product view stays visible.
    TopEnd,
}

/// A transient message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub position: NotificationPosition,
    pub dismiss_after: Duration,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>, position: NotificationPosition) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            position,
            dismiss_after: AUTO_DISMISS,
        }
    }

    /// Errors are always centered.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            position: NotificationPosition::Center,
            dismiss_after: AUTO_DISMISS,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for notifications raised by the controller.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Writes notifications to the log. Useful headless.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(message = %notification.message, "notification"),
            NotificationLevel::Error => warn!(message = %notification.message, "notification"),
        }
    }
}

/// Forwards notifications to a UI loop over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the UI drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            debug!("Notification dropped, receiver closed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_centered() {
        let n = Notification::error("系統異常請稍後再試");
        assert!(n.is_error());
        assert_eq!(n.position, NotificationPosition::Center);
        assert_eq!(n.dismiss_after, AUTO_DISMISS);
    }

    #[tokio::test]
    async fn test_channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::new();
        notifier.notify(Notification::success("一", NotificationPosition::TopEnd));
        notifier.notify(Notification::error("二"));

        assert_eq!(receiver.recv().await.unwrap().message, "一");
        assert_eq!(receiver.recv().await.unwrap().message, "二");
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify(Notification::error("ignored"));
    }
}
