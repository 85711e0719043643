//! Loading interface translations from the portal.

use transdesk_core::i18n::{validate_language_code, Translations};

use crate::api::PortalApi;

/// Fetches translation tables. Failures are logged, never shown.
pub struct LanguageLoader {
    api: PortalApi,
}

impl LanguageLoader {
    pub fn new(api: PortalApi) -> Self {
        Self { api }
    }

    /// Load the table for `lang`, or `None` if it cannot be fetched.
    pub async fn load(&self, lang: &str) -> Option<Translations> {
        if let Err(e) = validate_language_code(lang) {
            tracing::warn!(lang, error = %e, "Refusing to load language");
            return None;
        }

        match self.api.translations(lang).await {
            Ok(table) => {
                tracing::debug!(lang, entries = table.len(), "Translations loaded");
                Some(table)
            }
            Err(e) => {
                tracing::warn!(lang, error = %e, "Failed to load translations");
                None
            }
        }
    }
}
