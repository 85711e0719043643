#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use transdesk_client::actions::{ActionSettings, ProjectActions};
use transdesk_client::api::PortalApi;
use transdesk_client::reload::{ReloadScope, Reloader};
use transdesk_core::alert::AlertLog;

/// A request received by the mock portal.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Hit {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

/// Canned answer for one route.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            headers: vec![("content-type", "application/json".into())],
            body: value.to_string().into_bytes(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("content-type", "text/html".into())],
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn file(disposition: Option<&str>, bytes: &[u8]) -> Self {
        let mut headers = vec![("content-type", "application/octet-stream".to_string())];
        if let Some(d) = disposition {
            headers.push(("content-disposition", d.to_string()));
        }
        Self {
            status: 200,
            headers,
            body: bytes.to_vec(),
        }
    }
}

#[derive(Default)]
struct PortalState {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    hits: Mutex<Vec<Hit>>,
}

/// In-process portal bound to an ephemeral port. Unrouted requests get
/// a 404 with `{"error": "not found"}`.
pub struct MockPortal {
    pub base_url: String,
    state: Arc<PortalState>,
}

impl MockPortal {
    pub async fn start() -> Self {
        let state = Arc::new(PortalState::default());
        let app = Router::new()
            .fallback(record)
            .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Answer `method path` with `reply`.
    pub fn route(&self, method: Method, path: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn api(&self) -> PortalApi {
        PortalApi::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }
}

async fn record(
    State(state): State<Arc<PortalState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.hits.lock().unwrap().push(Hit {
        method: method.clone(),
        path: path.clone(),
        content_type: headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned()
        .unwrap_or_else(|| Reply::json(404, serde_json::json!({ "error": "not found" })));

    let mut response = (
        StatusCode::from_u16(reply.status).unwrap(),
        reply.body,
    )
        .into_response();
    for (name, value) in reply.headers {
        response
            .headers_mut()
            .insert(name, HeaderValue::from_str(&value).unwrap());
    }
    response
}

/// Base URL of a port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Reloader that records every requested scope.
#[derive(Default)]
pub struct RecordingReloader {
    scopes: Mutex<Vec<ReloadScope>>,
}

impl RecordingReloader {
    pub fn scopes(&self) -> Vec<ReloadScope> {
        self.scopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reloader for RecordingReloader {
    async fn reload(&self, scope: ReloadScope) {
        self.scopes.lock().unwrap().push(scope);
    }
}

/// Project actions wired to `api`, with no reload delay.
pub struct Harness {
    pub actions: ProjectActions,
    pub alerts: Arc<AlertLog>,
    pub reloader: Arc<RecordingReloader>,
}

pub fn harness(api: PortalApi, download_dir: &Path) -> Harness {
    harness_with_delay(api, download_dir, Duration::ZERO)
}

pub fn harness_with_delay(api: PortalApi, download_dir: &Path, reload_delay: Duration) -> Harness {
    let alerts = Arc::new(AlertLog::new());
    let reloader = Arc::new(RecordingReloader::default());
    let actions = ProjectActions::new(
        api,
        alerts.clone(),
        reloader.clone(),
        ActionSettings {
            reload_delay,
            download_dir: download_dir.to_path_buf(),
        },
    );
    Harness {
        actions,
        alerts,
        reloader,
    }
}

/// Write `size` bytes to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'x'; size]).unwrap();
    path
}
