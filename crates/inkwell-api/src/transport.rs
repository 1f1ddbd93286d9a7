// HTTP transport settings: timeout and the session cookie jar.
//
// The resource client and the session login flow must share one cookie
// jar, otherwise the session cookie issued at login never reaches the
// API calls that follow.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// Settings every `reqwest::Client` in the workspace is built from.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            cookie_jar: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// Every request defaults to `Content-Type: application/json`; request
    /// builders that set their own content type (form login) override it.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("inkwell/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(ref jar) = self.cookie_jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }

        builder.build().map_err(crate::error::Error::Transport)
    }

    /// Attach a new, empty cookie jar.
    pub fn with_cookie_jar(mut self) -> Self {
        self.cookie_jar = Some(Arc::new(Jar::default()));
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_jar() {
        let config = TransportConfig::default();
        assert!(config.cookie_jar.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_cookie_jar_attaches_jar() {
        let config = TransportConfig::default()
            .with_cookie_jar()
            .with_timeout(Duration::from_secs(5));
        assert!(config.cookie_jar.is_some());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.build_client().is_ok());
    }
}
