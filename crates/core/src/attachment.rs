//! Local files selected for upload.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// A file on the local filesystem chosen for upload.
///
/// Only metadata is read when the attachment is opened, so size checks
/// run before the file contents are loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    /// Name sent as the multipart part's file name.
    pub file_name: String,
    /// Size in bytes at the time the attachment was opened.
    pub size: u64,
}

impl Attachment {
    /// Stat `path` and build an attachment from it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(CoreError::Validation(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
        })
    }

    /// Read the full contents of the file.
    pub async fn read(&self) -> Result<Vec<u8>, CoreError> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}
