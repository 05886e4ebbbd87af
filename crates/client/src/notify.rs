//! User-facing notifications.
//!
//! The state holders report outcomes (logged in, item added, operation
//! failed) as dismissable notices rather than panicking or printing. The
//! front end decides how to render them; the default sink logs through
//! `tracing`.

use std::sync::Arc;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A single dismissable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    #[must_use]
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for notices produced by the state holders.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Shared handle to a notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Default sink: structured log lines via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => {
                tracing::info!(title = %notice.title, body = %notice.body, "notice");
            }
            Severity::Error => {
                tracing::error!(title = %notice.title, body = %notice.body, "notice");
            }
        }
    }
}

/// Collects notices for assertions. Test-only sink.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: std::sync::Mutex<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of everything notified so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether any recorded notice has the given title.
    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        self.recorded().iter().any(|notice| notice.title == title)
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_log_records_in_order() {
        let log = NoticeLog::new();
        log.notify(Notice::info("Added to cart", "Item has been added"));
        log.notify(Notice::error("Error", "Failed to update item"));

        let recorded = log.recorded();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].severity, Severity::Info);
        assert!(log.contains_title("Error"));
    }
}
