//! Message composer for writing to a project's customer or translator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use transdesk_core::alert::{Alert, AlertSink};
use transdesk_core::message::MessageDraft;

use crate::api::{ApiError, PortalApi};

/// Holds one [`MessageDraft`] and sends it.
///
/// Only one send may be in flight; further [`send`](Self::send) calls
/// are ignored until it completes, like a disabled send button.
pub struct MessageComposer {
    api: PortalApi,
    alerts: Arc<dyn AlertSink>,
    draft: Mutex<MessageDraft>,
    sending: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct SendingGuard<'a>(&'a AtomicBool);

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MessageComposer {
    pub fn new(api: PortalApi, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            api,
            alerts,
            draft: Mutex::new(MessageDraft::default()),
            sending: AtomicBool::new(false),
        }
    }

    /// Reset the draft for a project.
    pub fn open(&self, project_id: Option<&str>, customer_id: Option<&str>, translator_id: Option<&str>) {
        *self.lock() = MessageDraft::open(project_id, customer_id, translator_id);
    }

    /// Modify the current draft.
    pub fn edit(&self, f: impl FnOnce(&mut MessageDraft)) {
        f(&mut self.lock());
    }

    /// Copy of the current draft.
    pub fn draft(&self) -> MessageDraft {
        self.lock().clone()
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::Acquire)
    }

    /// Validate and send the draft.
    ///
    /// Returns the alert shown, or `None` when a send was already in
    /// flight and this call was ignored.
    pub async fn send(&self) -> Option<Alert> {
        if self
            .sending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Send already in flight, ignoring");
            return None;
        }
        let _guard = SendingGuard(&self.sending);

        let request = match self.draft().validate() {
            Ok(request) => request,
            Err(alert) => return Some(self.show(alert)),
        };

        tracing::info!(
            project_id = %request.project_id,
            recipient = %request.recipient_user_id,
            "Sending message",
        );

        let alert = match self.api.send_email(&request).await {
            Ok(_) => {
                self.lock().body.clear();
                Alert::success("Email sent.")
            }
            Err(ApiError::Rejected { status, body }) => {
                let text = body
                    .message()
                    .or(body.error())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Failed ({status})"));
                tracing::warn!(status, error = %text, "Message rejected");
                Alert::error(text)
            }
            Err(e) => {
                tracing::error!(error = %e, "Message send error");
                Alert::error(format!("Network error: {e}"))
            }
        };

        Some(self.show(alert))
    }

    fn show(&self, alert: Alert) -> Alert {
        self.alerts.show_alert(alert.clone());
        alert
    }

    fn lock(&self) -> MutexGuard<'_, MessageDraft> {
        self.draft.lock().unwrap_or_else(|e| e.into_inner())
    }
}
