//! Domain types for the Transdesk portal client.
//!
//! Everything here is free of network I/O: alert model and sink trait,
//! form types with their client-side validation, the upload size policy,
//! `Content-Disposition` parsing and translation tables. The HTTP layer
//! lives in `transdesk-client`.

pub mod alert;
pub mod attachment;
pub mod auth;
pub mod disposition;
pub mod error;
pub mod i18n;
pub mod limits;
pub mod message;
pub mod project;
