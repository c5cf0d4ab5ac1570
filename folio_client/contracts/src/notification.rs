/// Port through which the contact form shows transient notifications (e.g.
/// toasts) to the user.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl Notification {
    pub fn message_sent() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Message sent!".into(),
            description: "Thanks for reaching out. I'll get back to you soon.".into(),
        }
    }

    pub fn send_failed(reason: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error sending message".into(),
            description: reason.into(),
        }
    }
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify(mut self, notification: Notification) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(notification))
            .return_const(());
        self
    }
}
