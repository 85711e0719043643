//! Transient user notifications.
//!
//! Every client action reports its outcome through exactly one [`Alert`]
//! delivered to an [`AlertSink`]. The sink decides how to render it
//! (terminal line, banner, log record).

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;

/// Severity of an alert. Doubles as the banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Warning,
    Error,
    Info,
}

impl AlertKind {
    /// Banner style suffix. `Error` renders with the `danger` style.
    pub fn css_class(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "danger",
            AlertKind::Info => "info",
        }
    }

    /// Whether this alert reports a blocked or failed action.
    pub fn is_failure(self) -> bool {
        matches!(self, AlertKind::Warning | AlertKind::Error)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
            AlertKind::Info => "info",
        };
        f.write_str(name)
    }
}

/// A single notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn new(kind: AlertKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, text)
    }
}

/// Destination for alerts. Implementations must be cheap to call; the
/// actions call [`show_alert`](Self::show_alert) once per outcome.
pub trait AlertSink: Send + Sync {
    fn show_alert(&self, alert: Alert);
}

/// In-memory sink that records alerts in arrival order.
#[derive(Debug, Default)]
pub struct AlertLog {
    entries: Mutex<Vec<Alert>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every alert shown so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    /// The most recent alert, if any.
    pub fn last(&self) -> Option<Alert> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Alert>> {
        // A poisoned log still holds valid alerts.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AlertSink for AlertLog {
    fn show_alert(&self, alert: Alert) {
        self.lock().push(alert);
    }
}
