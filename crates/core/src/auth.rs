//! Account roles and the login/registration forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Portal account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Customer,
    Translator,
    Administrator,
}

impl Role {
    /// Page a user lands on after logging in.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Customer => "/api/customer",
            Role::Translator => "/api/translator",
            Role::Administrator => "/api/administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Customer => "CUSTOMER",
            Role::Translator => "TRANSLATOR",
            Role::Administrator => "ADMINISTRATOR",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "TRANSLATOR" => Ok(Role::Translator),
            "ADMINISTRATOR" => Ok(Role::Administrator),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

/// Split a free-text language list on commas, semicolons or newlines.
pub fn parse_languages(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// JSON body of `POST /auth/api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

/// Raw values of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub languages: Vec<String>,
}

/// JSON body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

impl RegistrationForm {
    /// Translators must list at least one language; other roles never
    /// send a language list.
    pub fn validate(self) -> Result<RegisterRequest, CoreError> {
        let languages = match self.role {
            Role::Translator if self.languages.is_empty() => {
                return Err(CoreError::MissingInput(
                    "Please select at least one language you translate.".into(),
                ));
            }
            Role::Translator => Some(self.languages),
            _ => None,
        };

        Ok(RegisterRequest {
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            languages,
        })
    }
}
