use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub detail: Option<String>,
    pub raised_at: DateTime<Utc>,
}

/// Transient user-facing messages. Fire and forget: callers never learn
/// whether a message was displayed.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn success(&mut self, title: &str, detail: Option<String>) {
        log::info!("{title}{}", detail_suffix(detail.as_deref()));
        self.notify(Notification {
            severity: Severity::Success,
            title: title.to_string(),
            detail,
            raised_at: Utc::now(),
        });
    }

    fn error(&mut self, title: &str, detail: Option<String>) {
        log::warn!("{title}{}", detail_suffix(detail.as_deref()));
        self.notify(Notification {
            severity: Severity::Error,
            title: title.to_string(),
            detail,
            raised_at: Utc::now(),
        });
    }

    fn rejected(&mut self, err: &ValidationError) {
        self.error(err.message, None);
    }
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

/// Oldest toasts are dropped beyond this many unshown ones.
pub const MAX_PENDING_TOASTS: usize = 8;

/// Per-session queue; toasts are shown once, on the next page render.
#[derive(Debug, Default)]
pub struct Toasts {
    pending: VecDeque<Notification>,
}

impl Toasts {
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.pending.back()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        if self.pending.len() == MAX_PENDING_TOASTS {
            self.pending.pop_front();
        }
        self.pending.push_back(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut toasts = Toasts::default();
        toasts.success("first", None);
        toasts.error("second", Some("why".to_string()));

        let shown = toasts.drain();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].severity, Severity::Success);
        assert_eq!(shown[1].title, "second");
        assert_eq!(shown[1].detail.as_deref(), Some("why"));
        assert!(toasts.is_empty());
    }

    #[test]
    fn unshown_toasts_are_capped_keeping_newest() {
        let mut toasts = Toasts::default();
        for n in 0..MAX_PENDING_TOASTS + 5 {
            toasts.success(&format!("toast {n}"), None);
        }

        assert_eq!(toasts.len(), MAX_PENDING_TOASTS);
        let shown = toasts.drain();
        assert_eq!(shown[0].title, "toast 5");
        assert_eq!(
            shown.last().map(|t| t.title.as_str()),
            Some(format!("toast {}", MAX_PENDING_TOASTS + 4).as_str())
        );
    }
}
