//! Upload size policy shared by project creation and translation upload.
//!
//! The client check is advisory; the portal re-checks on its side.

use crate::error::CoreError;

/// Largest file accepted for upload (10 MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reject files larger than [`MAX_FILE_SIZE`]. A file of exactly the
/// limit is accepted.
///
/// `message` is the user-facing text used on rejection, since create
/// and upload phrase it differently.
pub fn check_file_size(size: u64, message: &str) -> Result<(), CoreError> {
    if size > MAX_FILE_SIZE {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(())
}
