//! REST client for the portal's HTTP endpoints.
//!
//! Wraps the project, session, messaging and translation endpoints using
//! [`reqwest`]. The session is carried by cookie, so one [`PortalApi`]
//! (and its clones) share a cookie jar.

use std::time::Duration;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use transdesk_core::attachment::Attachment;
use transdesk_core::auth::{LoginForm, RegisterRequest};
use transdesk_core::disposition::filename_from_disposition;
use transdesk_core::error::CoreError;
use transdesk_core::i18n::Translations;
use transdesk_core::message::EmailRespondRequest;
use transdesk_core::project::{DownloadKind, NewProject, ProjectId, ProjectSummary, RejectRequest};

/// HTTP client for one portal deployment.
#[derive(Clone)]
pub struct PortalApi {
    client: reqwest::Client,
    base_url: String,
}

/// `{ message?, error? }` body returned by the portal's JSON endpoints.
///
/// Parsed leniently: a missing, empty or non-JSON body yields both
/// fields as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    fn from_body(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// The `message` field, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|s| !s.is_empty())
    }

    /// The `error` field, ignoring empty strings.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|s| !s.is_empty())
    }
}

/// A file received from a download endpoint.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Name taken from `Content-Disposition`, unsanitised.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Body returned by the login endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectEnvelope {
    project: ProjectSummary,
}

/// Errors from the portal REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The portal answered with a non-2xx status.
    #[error("Portal API error ({status}): {}", describe_body(.body))]
    Rejected {
        status: u16,
        /// Whatever `{ message, error }` could be read from the body.
        body: ApiMessage,
    },

    /// A local file could not be read.
    #[error(transparent)]
    Local(#[from] CoreError),
}

fn describe_body(body: &ApiMessage) -> &str {
    body.error().or(body.message()).unwrap_or("<no message>")
}

impl ApiError {
    /// Server-provided `error` text of a rejected request.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => body.error(),
            _ => None,
        }
    }
}

impl PortalApi {
    /// Create a client with its own cookie jar.
    ///
    /// * `base_url` - portal root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- projects ----

    /// `GET /api/project/{id}/download/{original|translation}`.
    pub async fn download_file(
        &self,
        id: ProjectId,
        kind: DownloadKind,
    ) -> Result<DownloadedFile, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/project/{id}/download/{}", kind.path_segment())))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile {
            file_name: filename_from_disposition(disposition.as_deref()),
            bytes,
        })
    }

    /// `POST /api/project/{id}/upload` with the file as `translated_file`.
    pub async fn upload_translation(
        &self,
        id: ProjectId,
        file: &Attachment,
    ) -> Result<ApiMessage, ApiError> {
        let form = Form::new().part("translated_file", Self::file_part(file).await?);

        let response = self
            .client
            .post(self.url(&format!("/api/project/{id}/upload")))
            .multipart(form)
            .send()
            .await?;

        Self::parse_message(response).await
    }

    /// `POST /api/project/{id}/accept`.
    pub async fn accept_project(&self, id: ProjectId) -> Result<ApiMessage, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/project/{id}/accept")))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        Self::parse_message(response).await
    }

    /// `POST /api/project/{id}/reject` with `{ feedback }`.
    pub async fn reject_project(
        &self,
        id: ProjectId,
        request: &RejectRequest,
    ) -> Result<ApiMessage, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/project/{id}/reject")))
            .json(request)
            .send()
            .await?;

        Self::parse_message(response).await
    }

    /// `POST /api/projects/{id}/close`. Note the plural collection path.
    pub async fn close_project(&self, id: ProjectId) -> Result<ApiMessage, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/api/projects/{id}/close")))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        Self::parse_message(response).await
    }

    /// `POST /api/projects` as a multipart form.
    pub async fn create_project(&self, project: &NewProject) -> Result<ApiMessage, ApiError> {
        let form = Form::new()
            .text("project_name", project.name.clone())
            .text("description", project.description.clone())
            .text("language", project.language.clone())
            .part("source_file", Self::file_part(&project.source_file).await?);

        let response = self
            .client
            .post(self.url("/api/projects"))
            .multipart(form)
            .send()
            .await?;

        Self::parse_message(response).await
    }

    /// `GET /api/project/{id}`.
    pub async fn get_project(&self, id: ProjectId) -> Result<ProjectSummary, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/project/{id}")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json::<ProjectEnvelope>().await?.project)
    }

    // ---- session ----

    /// `POST /auth/api/login`. On success the session cookie is kept in
    /// this client's jar.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/api/login"))
            .json(form)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes).unwrap_or_default())
    }

    /// `POST /api/users`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, ApiError> {
        let response = self
            .client
            .post(self.url("/api/users"))
            .json(request)
            .send()
            .await?;

        Self::parse_message(response).await
    }

    // ---- messaging ----

    /// `POST /api/email/respond`.
    pub async fn send_email(&self, request: &EmailRespondRequest) -> Result<ApiMessage, ApiError> {
        let response = self
            .client
            .post(self.url("/api/email/respond"))
            .json(request)
            .send()
            .await?;

        Self::parse_message(response).await
    }

    // ---- translations ----

    /// `GET /static/json/{lang}.json`.
    pub async fn translations(&self, lang: &str) -> Result<Translations, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/static/json/{lang}.json")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json::<Translations>().await?)
    }

    // ---- private helpers ----

    async fn file_part(file: &Attachment) -> Result<Part, ApiError> {
        let bytes = file.read().await?;
        Ok(Part::bytes(bytes).file_name(file.file_name.clone()))
    }

    /// Pass a 2xx response through; turn anything else into
    /// [`ApiError::Rejected`] with whatever JSON the body holds.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(bytes) => ApiMessage::from_body(&bytes),
                Err(_) => ApiMessage::default(),
            };
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Check the status and read the body as a lenient [`ApiMessage`].
    async fn parse_message(response: reqwest::Response) -> Result<ApiMessage, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(ApiMessage::from_body(&bytes))
    }
}
