use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Default origin for a local development backend.
pub const DEV_ORIGIN: &str = "http://localhost:8000";

/// Path of the REST API relative to the origin.
pub const API_PATH: &str = "/api/v1";

/// Path of the session login/logout views relative to the origin.
pub const AUTH_PATH: &str = "/api-auth";

/// Which deployment the client talks to.
///
/// Development uses absolute URLs against a local backend; production uses
/// the relative API paths on the same origin the client was served from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// The environment implied by the build profile: debug builds talk to
    /// the development backend, release builds to production.
    pub const fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// The origin used when none is configured.
    ///
    /// Returns `None` for [`Production`](Self::Production): relative paths
    /// need the serving origin, which only the caller knows.
    pub const fn default_origin(self) -> Option<&'static str> {
        match self {
            Self::Development => Some(DEV_ORIGIN),
            Self::Production => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Resolved base URLs for the REST API and the session auth views.
///
/// Both bases always end with `/` so relative joins append path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: Url,
    auth_base: Url,
}

impl Endpoints {
    /// Build from explicit absolute base URLs.
    pub fn new(api_base: Url, auth_base: Url) -> Self {
        Self {
            api_base: with_trailing_slash(api_base),
            auth_base: with_trailing_slash(auth_base),
        }
    }

    /// Join the default API and auth paths onto an origin.
    pub fn from_origin(origin: &Url) -> Result<Self, Error> {
        Ok(Self::new(origin.join(API_PATH)?, origin.join(AUTH_PATH)?))
    }

    /// Resolve endpoints for an environment, with an optional origin override.
    ///
    /// Fails with [`Error::InvalidUrl`] in production when no origin is given.
    pub fn for_environment(env: Environment, origin: Option<&str>) -> Result<Self, Error> {
        let raw = origin
            .or_else(|| env.default_origin())
            .ok_or(Error::InvalidUrl(url::ParseError::RelativeUrlWithoutBase))?;
        Self::from_origin(&Url::parse(raw)?)
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn auth_base(&self) -> &Url {
        &self.auth_base
    }

    /// Join a relative path (e.g. `"posts/4/"`) onto the API base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.api_base.join(path.trim_start_matches('/'))?)
    }

    /// Join a relative path (e.g. `"login/"`) onto the auth base.
    pub(crate) fn auth_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.auth_base.join(path.trim_start_matches('/'))?)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
