//! Project actions: the user-facing operations behind project buttons.
//!
//! Each action validates its input, calls [`PortalApi`], and reports the
//! outcome through exactly one [`Alert`]. Errors never propagate to the
//! caller; they become error alerts. Successful mutations trigger a
//! [`Reloader`] after [`ActionSettings::reload_delay`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use transdesk_core::alert::{Alert, AlertSink};
use transdesk_core::disposition::safe_file_name;
use transdesk_core::error::CoreError;
use transdesk_core::project::{DownloadKind, ProjectForm, ProjectId, RejectRequest, UploadForm};

use crate::api::{ApiError, ApiMessage, PortalApi};
use crate::reload::{ReloadScope, Reloader};

/// Delay between a success alert and the reload, so the alert can be read.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(1200);

/// Tunables for [`ProjectActions`].
#[derive(Debug, Clone)]
pub struct ActionSettings {
    pub reload_delay: Duration,
    /// Directory downloads are written into.
    pub download_dir: PathBuf,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            reload_delay: DEFAULT_RELOAD_DELAY,
            download_dir: PathBuf::from("."),
        }
    }
}

/// User-facing texts for one action.
struct Outcome {
    /// Shown on success when the server sends no `message`.
    success: &'static str,
    /// Shown on a non-2xx response without an `error` field.
    failure: &'static str,
    /// Shown when the request never completed.
    network: &'static str,
}

const UPLOAD: Outcome = Outcome {
    success: "Translated file uploaded!",
    failure: "Upload failed",
    network: "Network error during upload.",
};

const ACCEPT: Outcome = Outcome {
    success: "Project accepted!",
    failure: "Failed to accept project.",
    network: "Network error.",
};

const REJECT: Outcome = Outcome {
    success: "Project rejected.",
    failure: "Failed to reject project.",
    network: "Network error during rejection.",
};

const CLOSE: Outcome = Outcome {
    success: "Project closed successfully!",
    failure: "Failed to close project.",
    network: "Network error while closing project.",
};

const CREATE: Outcome = Outcome {
    success: "Project created successfully!",
    failure: "Failed to create project.",
    network: "Network error while creating project.",
};

const DOWNLOAD_FAILED: &str = "Download failed.";
const DOWNLOAD_NETWORK: &str = "Network error during download.";

/// Why an action did not succeed.
#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error(transparent)]
    Invalid(#[from] CoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    fn to_alert(&self, texts: &Outcome) -> Alert {
        match self {
            ActionError::Invalid(e) => e.to_alert(),
            ActionError::Api(e) => api_failure_alert(e, texts.failure, texts.network),
        }
    }
}

/// Alert for a failed portal call: the server's `error` text when it sent
/// one, otherwise the action's fallback.
fn api_failure_alert(err: &ApiError, failure: &str, network: &str) -> Alert {
    match err {
        ApiError::Rejected { .. } => Alert::error(err.server_error().unwrap_or(failure)),
        ApiError::Request(_) => Alert::error(network),
        ApiError::Local(e) => e.to_alert(),
    }
}

/// Project lifecycle and file transfer actions.
pub struct ProjectActions {
    api: PortalApi,
    alerts: Arc<dyn AlertSink>,
    reloader: Arc<dyn Reloader>,
    settings: ActionSettings,
}

impl ProjectActions {
    pub fn new(
        api: PortalApi,
        alerts: Arc<dyn AlertSink>,
        reloader: Arc<dyn Reloader>,
        settings: ActionSettings,
    ) -> Self {
        Self {
            api,
            alerts,
            reloader,
            settings,
        }
    }

    /// Download a project's original file.
    pub async fn download_original(&self, id: ProjectId) -> Result<PathBuf, Alert> {
        self.download(id, DownloadKind::Original).await
    }

    /// Download a project's translated file.
    pub async fn download_translation(&self, id: ProjectId) -> Result<PathBuf, Alert> {
        self.download(id, DownloadKind::Translation).await
    }

    /// Fetch a file and save it under the download directory.
    ///
    /// Returns the saved path. On failure the returned alert has already
    /// been shown; a successful download shows no alert.
    async fn download(&self, id: ProjectId, kind: DownloadKind) -> Result<PathBuf, Alert> {
        tracing::info!(project_id = %id, kind = kind.path_segment(), "Downloading project file");

        let file = match self.api.download_file(id, kind).await {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(project_id = %id, error = %e, "Download failed");
                return Err(self.show(api_failure_alert(&e, DOWNLOAD_FAILED, DOWNLOAD_NETWORK)));
            }
        };

        let name = safe_file_name(&file.file_name);
        let target = match save(&self.settings.download_dir, &name, &file.bytes).await {
            Ok(path) => path,
            Err(e) => {
                let dir = self.settings.download_dir.display();
                tracing::error!(dir = %dir, file = %name, error = %e, "Could not save download");
                return Err(self.show(Alert::error(format!("Could not save {name}: {e}"))));
            }
        };

        tracing::info!(
            project_id = %id,
            path = %target.display(),
            size = file.bytes.len(),
            "Download saved",
        );
        Ok(target)
    }

    /// Upload the translated file selected for a project.
    pub async fn upload_translated_file(&self, id: ProjectId, form: UploadForm) -> Alert {
        let result = async {
            let file = form.validate()?;
            tracing::info!(project_id = %id, file = %file.file_name, size = file.size, "Uploading translation");
            Ok::<_, ActionError>(self.api.upload_translation(id, &file).await?)
        }
        .await;

        // The portal's own message is not shown for uploads.
        let result = result.map(|_| ApiMessage::default());
        self.finish(id, "upload", result, &UPLOAD, ReloadScope::Project(id))
            .await
    }

    /// Accept a project's delivered translation.
    pub async fn accept_project(&self, id: ProjectId) -> Alert {
        tracing::info!(project_id = %id, "Accepting project");
        let result = self.api.accept_project(id).await.map_err(ActionError::from);
        self.finish(id, "accept", result, &ACCEPT, ReloadScope::Project(id))
            .await
    }

    /// Reject a project's translation. Feedback is required.
    pub async fn reject_project(&self, id: ProjectId, feedback: &str) -> Alert {
        let result = async {
            let request = RejectRequest::from_input(feedback)?;
            tracing::info!(project_id = %id, feedback = %request.feedback, "Rejecting project");
            Ok::<_, ActionError>(self.api.reject_project(id, &request).await?)
        }
        .await;

        self.finish(id, "reject", result, &REJECT, ReloadScope::Project(id))
            .await
    }

    /// Close a project.
    pub async fn close_project(&self, id: ProjectId) -> Alert {
        tracing::info!(project_id = %id, "Closing project");
        let result = self.api.close_project(id).await.map_err(ActionError::from);
        self.finish(id, "close", result, &CLOSE, ReloadScope::Project(id))
            .await
    }

    /// Submit the create-project form.
    pub async fn create_project(&self, form: ProjectForm) -> Alert {
        let result = async {
            let project = form.validate()?;
            tracing::info!(
                name = %project.name,
                language = %project.language,
                file = %project.source_file.file_name,
                "Creating project",
            );
            Ok::<_, ActionError>(self.api.create_project(&project).await?)
        }
        .await;

        match result {
            Ok(body) => self.succeed(body.message().unwrap_or(CREATE.success), ReloadScope::Page).await,
            Err(e) => {
                tracing::warn!(error = %e, "Create project failed");
                self.show(e.to_alert(&CREATE))
            }
        }
    }

    // ---- private helpers ----

    async fn finish(
        &self,
        id: ProjectId,
        action: &'static str,
        result: Result<ApiMessage, ActionError>,
        texts: &Outcome,
        scope: ReloadScope,
    ) -> Alert {
        match result {
            Ok(body) => self.succeed(body.message().unwrap_or(texts.success), scope).await,
            Err(e) => {
                tracing::warn!(project_id = %id, action, error = %e, "Project action failed");
                self.show(e.to_alert(texts))
            }
        }
    }

    /// Show the success alert, wait, then reload.
    async fn succeed(&self, text: &str, scope: ReloadScope) -> Alert {
        let alert = self.show(Alert::success(text));
        tokio::time::sleep(self.settings.reload_delay).await;
        self.reloader.reload(scope).await;
        alert
    }

    fn show(&self, alert: Alert) -> Alert {
        self.alerts.show_alert(alert.clone());
        alert
    }
}

/// Upper bound on numbered variants tried for one download name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Write `bytes` into `dir` under `name`, never replacing an existing
/// file: a taken name becomes `name (1).ext`, `name (2).ext`, ...
async fn save(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(numbered_name(name, attempt));
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        match opened {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for {name}"),
    ))
}

fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{name} ({attempt})"),
    }
}
