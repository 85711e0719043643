use crate::alert::{Alert, AlertKind};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing or blank. Surfaced as a warning.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Input is present but not acceptable (oversized file, bad id).
    /// Surfaced as an error.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// The alert a user sees when this error blocks an action.
    pub fn to_alert(&self) -> Alert {
        match self {
            CoreError::MissingInput(msg) => Alert::new(AlertKind::Warning, msg.clone()),
            CoreError::Validation(msg) => Alert::new(AlertKind::Error, msg.clone()),
            CoreError::Io(e) => Alert::new(AlertKind::Error, format!("Could not read file: {e}")),
        }
    }
}
