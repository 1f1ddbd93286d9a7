//! Shared configuration for inkwell tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `inkwell_core::StoreConfig`. The CLI layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use inkwell_core::{Credentials, Environment, StoreConfig};

/// Environment variable consulted for the login password.
pub const PASSWORD_ENV: &str = "INKWELL_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for user '{username}' in profile '{profile}'")]
    NoPassword { profile: String, username: String },

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is selected.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile by name.
    ///
    /// The default profile may be absent from the file, in which case an
    /// empty profile (pure environment defaults) stands in for it.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        if let Some(profile) = self.profiles.get(name) {
            return Ok(profile.clone());
        }
        if self.default_profile.as_deref().unwrap_or("default") == name {
            return Ok(Profile::default());
        }
        Err(ConfigError::UnknownProfile(name.into()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Environment for profiles that don't set one. Falls back to the
    /// build profile when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            environment: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// `development` or `production`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,

    /// Origin serving the API (e.g. "https://blog.example.com").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Full API base URL, overriding the environment default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Full session-auth base URL, overriding the environment default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_base: Option<String>,

    /// Username for session login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password (plaintext, prefer an env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    /// Override timeout (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Profile {
    /// Keys accepted by [`Profile::set`].
    pub const KEYS: &[&str] = &[
        "environment",
        "origin",
        "api_base",
        "auth_base",
        "username",
        "password",
        "password_env",
        "timeout",
    ];

    /// Set one field from its string form, validating it first.
    ///
    /// Dashes in `key` are accepted in place of underscores.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.replace('-', "_");
        match key.as_str() {
            "environment" => {
                let env = value.parse().map_err(|_| ConfigError::Validation {
                    field: key.clone(),
                    reason: "must be 'development' or 'production'".into(),
                })?;
                self.environment = Some(env);
            }
            "origin" | "api_base" | "auth_base" => {
                parse_url(&key, Some(value))?;
                let slot = match key.as_str() {
                    "origin" => &mut self.origin,
                    "api_base" => &mut self.api_base,
                    _ => &mut self.auth_base,
                };
                *slot = Some(value.to_owned());
            }
            "username" => self.username = Some(value.to_owned()),
            "password" => self.password = Some(value.to_owned()),
            "password_env" => self.password_env = Some(value.to_owned()),
            "timeout" => {
                let secs = value.parse().map_err(|_| ConfigError::Validation {
                    field: key.clone(),
                    reason: "must be a number (seconds)".into(),
                })?;
                self.timeout = Some(secs);
            }
            _ => {
                return Err(ConfigError::Validation {
                    field: key.clone(),
                    reason: format!("unknown key. Valid keys: {}", Self::KEYS.join(", ")),
                });
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "inkwell", "inkwell").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("inkwell");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + `INKWELL_*` environment variables.
///
/// Nested keys use a double underscore: `INKWELL_DEFAULTS__TIMEOUT=5`,
/// `INKWELL_PROFILES__PROD__ORIGIN=https://blog.example.com`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("INKWELL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the login password for `username`.
///
/// Order: the env var named by `password_env`, then `INKWELL_PASSWORD`,
/// then the plaintext profile value.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
    username: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(val));
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoPassword {
        profile: profile_name.into(),
        username: username.into(),
    })
}

/// Credentials for a profile, or `None` when it names no user.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<Credentials>, ConfigError> {
    let Some(ref username) = profile.username else {
        return Ok(None);
    };
    let password = resolve_password(profile, profile_name, username)?;
    Ok(Some(Credentials {
        username: username.clone(),
        password,
    }))
}

/// Parse an optional URL field, naming the field on failure.
pub fn parse_url(field: &str, raw: Option<&str>) -> Result<Option<Url>, ConfigError> {
    raw.map(|s| {
        Url::parse(s).map_err(|e| ConfigError::Validation {
            field: field.into(),
            reason: format!("invalid URL '{s}': {e}"),
        })
    })
    .transpose()
}

/// Build a `StoreConfig` from a profile without CLI overrides.
pub fn profile_to_store_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    if let Some(ref origin) = profile.origin {
        parse_url("origin", Some(origin))?;
    }

    Ok(StoreConfig {
        environment: profile
            .environment
            .or(defaults.environment)
            .unwrap_or_else(Environment::from_build),
        origin: profile.origin.clone(),
        api_base: parse_url("api_base", profile.api_base.as_deref())?,
        auth_base: parse_url("auth_base", profile.auth_base.as_deref())?,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        credentials: resolve_credentials(profile, profile_name)?,
    })
}
