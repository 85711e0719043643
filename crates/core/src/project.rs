//! Project identifiers, summaries and the forms behind project actions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;
use crate::error::CoreError;
use crate::limits::check_file_size;

/// Portal-assigned project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ProjectId)
            .map_err(|_| CoreError::Validation(format!("Invalid project id: {s:?}")))
    }
}

/// Lifecycle state of a project as reported by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    Created,
    Assigned,
    Completed,
    Approved,
    Closed,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectStatus::Created => "CREATED",
            ProjectStatus::Assigned => "ASSIGNED",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Approved => "APPROVED",
            ProjectStatus::Closed => "CLOSED",
            ProjectStatus::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Project as returned by `GET /api/project/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
}

/// Which of a project's files to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Original,
    Translation,
}

impl DownloadKind {
    /// Final segment of the download URL.
    pub fn path_segment(self) -> &'static str {
        match self {
            DownloadKind::Original => "original",
            DownloadKind::Translation => "translation",
        }
    }
}

/// JSON body of a reject call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectRequest {
    pub feedback: String,
}

impl RejectRequest {
    /// Build from raw feedback input. Feedback is required.
    pub fn from_input(input: &str) -> Result<Self, CoreError> {
        let feedback = input.trim();
        if feedback.is_empty() {
            return Err(CoreError::MissingInput("Feedback is required.".into()));
        }
        Ok(Self {
            feedback: feedback.to_string(),
        })
    }
}

/// Raw values of the create-project form.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    /// Target language code as selected by the user.
    pub language: String,
    pub source_file: Option<Attachment>,
}

/// A create-project form that passed validation.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub language: String,
    pub source_file: Attachment,
}

impl ProjectForm {
    /// Check that every field is filled in and the source file fits the
    /// upload limit.
    pub fn validate(self) -> Result<NewProject, CoreError> {
        let name = self.name.trim();
        let description = self.description.trim();

        let source_file = match self.source_file {
            Some(file) if !name.is_empty() && !description.is_empty() && !self.language.is_empty() => file,
            _ => return Err(CoreError::MissingInput("All fields are required.".into())),
        };

        check_file_size(
            source_file.size,
            "Source file exceeds the maximum size of 10 MB.",
        )?;

        Ok(NewProject {
            name: name.to_string(),
            description: description.to_string(),
            language: self.language,
            source_file,
        })
    }
}

/// Raw value of a per-project upload input.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<Attachment>,
}

impl UploadForm {
    pub fn validate(self) -> Result<Attachment, CoreError> {
        let file = self
            .file
            .ok_or_else(|| CoreError::MissingInput("Please select a file.".into()))?;
        check_file_size(file.size, "File exceeds the maximum size of 10 MB.")?;
        Ok(file)
    }
}
