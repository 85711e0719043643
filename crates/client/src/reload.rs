//! Hook run after a successful mutation to refresh what the user sees.

use async_trait::async_trait;

use transdesk_core::project::ProjectId;

/// What needs refreshing after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadScope {
    /// A single project's view.
    Project(ProjectId),
    /// The whole page (e.g. after a project was created).
    Page,
}

#[async_trait]
pub trait Reloader: Send + Sync {
    async fn reload(&self, scope: ReloadScope);
}
