// ── Runtime connection configuration ──
//
// Describes which backend to talk to and how. Built by the CLI (or any
// other front end) and handed to `Store::connect`; core never reads files.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use inkwell_api::{Endpoints, Environment, TransportConfig};

use crate::error::CoreError;

/// Username/password pair for session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selects the default base URLs.
    pub environment: Environment,
    /// Origin the relative production paths are resolved against
    /// (e.g. `https://blog.example.com`). Overrides the development origin.
    pub origin: Option<String>,
    /// Explicit API base, overriding the environment default.
    pub api_base: Option<Url>,
    /// Explicit session-auth base, overriding the environment default.
    pub auth_base: Option<Url>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Log in with these before the first request, when present.
    pub credentials: Option<Credentials>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            environment: Environment::from_build(),
            origin: None,
            api_base: None,
            auth_base: None,
            timeout: Duration::from_secs(30),
            credentials: None,
        }
    }
}

impl StoreConfig {
    /// Resolve the API and auth base URLs.
    pub fn endpoints(&self) -> Result<Endpoints, CoreError> {
        let defaults = Endpoints::for_environment(self.environment, self.origin.as_deref())
            .map_err(|e| CoreError::Config {
                message: format!(
                    "cannot resolve {} endpoints: {e} (set an origin)",
                    self.environment
                ),
            })?;

        Ok(Endpoints::new(
            self.api_base
                .clone()
                .unwrap_or_else(|| defaults.api_base().clone()),
            self.auth_base
                .clone()
                .unwrap_or_else(|| defaults.auth_base().clone()),
        ))
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_timeout(self.timeout)
            .with_cookie_jar()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults_to_localhost() {
        let config = StoreConfig {
            environment: Environment::Development,
            ..StoreConfig::default()
        };
        let endpoints = config.endpoints().unwrap();
        assert_eq!(
            endpoints.api_base().as_str(),
            "http://localhost:8000/api/v1/"
        );
        assert_eq!(
            endpoints.auth_base().as_str(),
            "http://localhost:8000/api-auth/"
        );
    }

    #[test]
    fn production_requires_origin() {
        let config = StoreConfig {
            environment: Environment::Production,
            ..StoreConfig::default()
        };
        assert!(matches!(config.endpoints(), Err(CoreError::Config { .. })));
    }

    #[test]
    fn production_joins_relative_paths() {
        let config = StoreConfig {
            environment: Environment::Production,
            origin: Some("https://blog.example.com".into()),
            ..StoreConfig::default()
        };
        let endpoints = config.endpoints().unwrap();
        assert_eq!(
            endpoints.api_base().as_str(),
            "https://blog.example.com/api/v1/"
        );
    }

    #[test]
    fn explicit_base_overrides_environment() {
        let config = StoreConfig {
            environment: Environment::Development,
            api_base: Some(Url::parse("http://10.0.0.5:9000/v2/").unwrap()),
            ..StoreConfig::default()
        };
        let endpoints = config.endpoints().unwrap();
        assert_eq!(endpoints.api_base().as_str(), "http://10.0.0.5:9000/v2/");
        assert_eq!(
            endpoints.auth_base().as_str(),
            "http://localhost:8000/api-auth/"
        );
    }
}
