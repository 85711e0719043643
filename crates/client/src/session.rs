//! Login and registration.

use std::sync::Arc;

use transdesk_core::alert::{Alert, AlertSink};
use transdesk_core::auth::{LoginForm, RegistrationForm, Role};

use crate::api::{ApiError, PortalApi};

/// Page shown after a successful registration.
pub const LOGIN_PATH: &str = "/auth/login";

const LOGIN_NETWORK: &str = "Network error during login.";
const REGISTER_NETWORK: &str = "Network error during registration.";

/// Session actions. Share the [`PortalApi`] with [`ProjectActions`](crate::actions::ProjectActions)
/// so later calls carry the session cookie.
pub struct SessionActions {
    api: PortalApi,
    alerts: Arc<dyn AlertSink>,
}

impl SessionActions {
    pub fn new(api: PortalApi, alerts: Arc<dyn AlertSink>) -> Self {
        Self { api, alerts }
    }

    /// Log in. Returns the account role (CUSTOMER when the portal does not
    /// say); use [`Role::landing_path`] to pick the next page.
    ///
    /// Shows one alert either way; on failure that alert is returned.
    pub async fn login(&self, form: &LoginForm) -> Result<Role, Alert> {
        let role = self.authenticate(form).await?;
        self.alerts.show_alert(Alert::success("Welcome back!"));
        Ok(role)
    }

    /// Log in ahead of another action. Success is only logged, so the
    /// action's own alert stays the only one shown; a failure is shown
    /// and returned as with [`login`](Self::login).
    pub async fn resume(&self, form: &LoginForm) -> Result<Role, Alert> {
        self.authenticate(form).await
    }

    async fn authenticate(&self, form: &LoginForm) -> Result<Role, Alert> {
        tracing::info!(name = %form.name, "Logging in");

        match self.api.login(form).await {
            Ok(response) => {
                let role = response
                    .role
                    .as_deref()
                    .and_then(|r| r.parse::<Role>().ok())
                    .unwrap_or_default();
                tracing::info!(name = %form.name, %role, "Logged in");
                Ok(role)
            }
            Err(e) => {
                tracing::warn!(name = %form.name, error = %e, "Login failed");
                Err(self.fail(&e, "Login failed", LOGIN_NETWORK))
            }
        }
    }

    /// Register a new account. Returns the login page path on success.
    pub async fn register(&self, form: RegistrationForm) -> Result<&'static str, Alert> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                let alert = e.to_alert();
                self.alerts.show_alert(alert.clone());
                return Err(alert);
            }
        };

        tracing::info!(name = %request.name, role = %request.role, "Registering account");

        match self.api.register(&request).await {
            Ok(_) => {
                self.alerts.show_alert(Alert::success("Registration successful!"));
                Ok(LOGIN_PATH)
            }
            Err(e) => {
                tracing::warn!(name = %request.name, error = %e, "Registration failed");
                Err(self.fail(&e, "Registration failed", REGISTER_NETWORK))
            }
        }
    }

    fn fail(&self, err: &ApiError, fallback: &str, network: &str) -> Alert {
        let alert = match err {
            ApiError::Request(_) => Alert::error(network),
            _ => Alert::error(err.server_error().unwrap_or(fallback)),
        };
        self.alerts.show_alert(alert.clone());
        alert
    }
}
