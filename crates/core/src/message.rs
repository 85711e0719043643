//! Drafts for messages sent to a project's customer or translator.

use serde::{Deserialize, Serialize};

use crate::alert::Alert;

/// Subject prefilled when a draft is opened.
pub const DEFAULT_SUBJECT: &str = "Regarding your feedback";

/// Who a message is addressed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecipientType {
    #[default]
    Customer,
    Translator,
}

impl RecipientType {
    fn label(self) -> &'static str {
        match self {
            RecipientType::Customer => "customer",
            RecipientType::Translator => "translator",
        }
    }
}

/// Editable state of the message dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    pub project_id: String,
    pub customer_id: String,
    pub translator_id: String,
    pub recipient_type: RecipientType,
    pub subject: String,
    pub body: String,
}

/// JSON body of `POST /api/email/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRespondRequest {
    pub project_id: String,
    pub recipient_type: RecipientType,
    pub recipient_user_id: String,
    pub subject: String,
    pub body: String,
}

impl MessageDraft {
    /// Fresh draft for a project, addressed to the customer.
    pub fn open(
        project_id: Option<&str>,
        customer_id: Option<&str>,
        translator_id: Option<&str>,
    ) -> Self {
        Self {
            project_id: project_id.unwrap_or_default().to_string(),
            customer_id: customer_id.unwrap_or_default().to_string(),
            translator_id: translator_id.unwrap_or_default().to_string(),
            recipient_type: RecipientType::Customer,
            subject: DEFAULT_SUBJECT.to_string(),
            body: String::new(),
        }
    }

    /// User id of the selected recipient.
    pub fn recipient_user_id(&self) -> &str {
        match self.recipient_type {
            RecipientType::Customer => &self.customer_id,
            RecipientType::Translator => &self.translator_id,
        }
    }

    /// Check the draft and build the request, or return the alert that
    /// blocks sending. Checks run in dialog order.
    pub fn validate(&self) -> Result<EmailRespondRequest, Alert> {
        if self.project_id.is_empty() {
            return Err(Alert::error("Missing project id."));
        }
        let recipient_user_id = self.recipient_user_id();
        if recipient_user_id.is_empty() {
            return Err(Alert::error(format!(
                "Missing {} id.",
                self.recipient_type.label()
            )));
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(Alert::warning("Subject cannot be empty."));
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(Alert::warning("Message cannot be empty."));
        }

        Ok(EmailRespondRequest {
            project_id: self.project_id.clone(),
            recipient_type: self.recipient_type,
            recipient_user_id: recipient_user_id.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }
}
