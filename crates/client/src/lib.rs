//! HTTP client and user actions for the Transdesk portal.
//!
//! [`api::PortalApi`] wraps the REST endpoints. The action types
//! ([`actions::ProjectActions`], [`session::SessionActions`],
//! [`message::MessageComposer`]) add client-side validation and report
//! every outcome as an alert.

pub mod actions;
pub mod api;
pub mod i18n;
pub mod message;
pub mod reload;
pub mod session;
