//! Terminal rendering of alerts and reloads.

use async_trait::async_trait;

use transdesk_client::api::PortalApi;
use transdesk_client::reload::{ReloadScope, Reloader};
use transdesk_core::alert::{Alert, AlertKind, AlertSink};
use transdesk_core::project::ProjectSummary;

/// Prints alerts as `[kind] text`; failures go to stderr.
#[derive(Debug, Default)]
pub struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn show_alert(&self, alert: Alert) {
        tracing::debug!(kind = %alert.kind, text = %alert.text, "Alert");
        match alert.kind {
            AlertKind::Success | AlertKind::Info => println!("{}", render(&alert)),
            AlertKind::Warning | AlertKind::Error => eprintln!("{}", render(&alert)),
        }
    }
}

fn render(alert: &Alert) -> String {
    format!("[{}] {}", alert.kind, alert.text)
}

/// One-line description of a project.
pub fn describe(project: &ProjectSummary) -> String {
    match project.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!(
            "#{} {} [{}] - {}",
            project.id, project.name, project.status, description
        ),
        None => format!("#{} {} [{}]", project.id, project.name, project.status),
    }
}

/// Re-fetches the affected project so the user sees its new state.
pub struct PortalReloader {
    api: PortalApi,
}

impl PortalReloader {
    pub fn new(api: PortalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reloader for PortalReloader {
    async fn reload(&self, scope: ReloadScope) {
        match scope {
            ReloadScope::Project(id) => match self.api.get_project(id).await {
                Ok(project) => println!("{}", describe(&project)),
                Err(e) => tracing::warn!(project_id = %id, error = %e, "Could not refresh project"),
            },
            ReloadScope::Page => tracing::info!("Page reloaded"),
        }
    }
}
