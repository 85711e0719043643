use std::path::PathBuf;
use std::time::Duration;

use transdesk_core::i18n::DEFAULT_LANGUAGE;

/// Login used before project commands when configured.
#[derive(Clone)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Portal root URL (default: `http://localhost:5000`).
    pub base_url: String,
    /// Where downloads are saved (default: current directory).
    pub download_dir: PathBuf,
    /// Pause between a success alert and the reload (default: 1200 ms).
    pub reload_delay: Duration,
    /// TCP connect timeout (default: 10 s).
    pub connect_timeout: Duration,
    /// Interface language (default: `en`).
    pub language: String,
    pub credentials: Option<Credentials>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} is set but {1} is not")]
    IncompleteCredentials(&'static str, &'static str),
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `TRANSDESK_BASE_URL`             | `http://localhost:5000` |
    /// | `TRANSDESK_DOWNLOAD_DIR`         | `.`                     |
    /// | `TRANSDESK_RELOAD_DELAY_MS`      | `1200`                  |
    /// | `TRANSDESK_CONNECT_TIMEOUT_SECS` | `10`                    |
    /// | `TRANSDESK_LANG`                 | `en`                    |
    /// | `TRANSDESK_USER`                 | unset                   |
    /// | `TRANSDESK_PASSWORD`             | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get("TRANSDESK_BASE_URL").unwrap_or_else(|| "http://localhost:5000".into());

        let download_dir = get("TRANSDESK_DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let reload_delay =
            Duration::from_millis(parse_number(&get, "TRANSDESK_RELOAD_DELAY_MS", 1200)?);

        let connect_timeout =
            Duration::from_secs(parse_number(&get, "TRANSDESK_CONNECT_TIMEOUT_SECS", 10)?);

        let language = get("TRANSDESK_LANG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.into());

        let credentials = match (get("TRANSDESK_USER"), get("TRANSDESK_PASSWORD")) {
            (Some(name), Some(password)) => Some(Credentials { name, password }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::IncompleteCredentials(
                    "TRANSDESK_USER",
                    "TRANSDESK_PASSWORD",
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteCredentials(
                    "TRANSDESK_PASSWORD",
                    "TRANSDESK_USER",
                ))
            }
        };

        Ok(Self {
            base_url,
            download_dir,
            reload_delay,
            connect_timeout,
            language,
            credentials,
        })
    }
}

fn parse_number(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match get(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert_eq!(config.reload_delay, Duration::from_millis(1200));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.language, "en");
        assert!(config.credentials.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("TRANSDESK_BASE_URL", "https://portal.example.com"),
            ("TRANSDESK_RELOAD_DELAY_MS", "0"),
            ("TRANSDESK_LANG", "de"),
            ("TRANSDESK_USER", "marta"),
            ("TRANSDESK_PASSWORD", "pw"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "https://portal.example.com");
        assert_eq!(config.reload_delay, Duration::ZERO);
        assert_eq!(config.language, "de");
        assert_eq!(config.credentials.unwrap().name, "marta");
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = load(&[("TRANSDESK_CONNECT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { var: "TRANSDESK_CONNECT_TIMEOUT_SECS", .. }
        ));
    }

    #[test]
    fn half_configured_credentials_are_an_error() {
        let err = load(&[("TRANSDESK_USER", "marta")]).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteCredentials("TRANSDESK_USER", _)));
    }

    #[test]
    fn password_is_not_printed() {
        let config = load(&[("TRANSDESK_USER", "marta"), ("TRANSDESK_PASSWORD", "s3cret")]).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
