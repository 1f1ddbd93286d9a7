//! CLI configuration: thin wrapper around `inkwell_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--environment, --origin, --username, --timeout).

use std::io::IsTerminal;

use secrecy::SecretString;

use inkwell_config::ConfigError;
use inkwell_core::{Credentials, StoreConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use inkwell_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// `ProfileNotFound` listing the profiles that do exist.
pub fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    names.sort();
    CliError::ProfileNotFound {
        name,
        available: if names.is_empty() {
            "(none)".into()
        } else {
            names.join(", ")
        },
        path: config_path().display().to_string(),
    }
}

/// Build a `StoreConfig` from the config file, active profile, and flags.
///
/// Flag values take priority over profile values.
pub fn resolve_store_config(global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = cfg.profile(&profile_name).map_err(|e| match e {
        ConfigError::UnknownProfile(name) => profile_not_found(name, &cfg),
        other => other.into(),
    })?;

    // 1. Flag overrides
    if let Some(env) = global.environment {
        profile.environment = Some(env);
    }
    if let Some(ref origin) = global.origin {
        profile.origin = Some(origin.clone());
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    let username = global.username.clone().or_else(|| profile.username.take());

    // 2. Everything but credentials through the shared translation
    let mut store_config =
        inkwell_config::profile_to_store_config(&profile, &profile_name, &cfg.defaults)?;

    // 3. Credentials: resolved chain, then an interactive prompt
    store_config.credentials = username
        .map(|username| resolve_credentials(&profile, &profile_name, username))
        .transpose()?;

    Ok(store_config)
}

fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    username: String,
) -> Result<Credentials, CliError> {
    match inkwell_config::resolve_password(profile, profile_name, &username) {
        Ok(password) => Ok(Credentials { username, password }),
        Err(ConfigError::NoPassword { .. }) if std::io::stdin().is_terminal() => {
            let entered = rpassword::prompt_password(format!("Password for {username}: "))?;
            Ok(Credentials {
                username,
                password: SecretString::from(entered),
            })
        }
        Err(ConfigError::NoPassword { .. }) => Err(CliError::AuthFailed {
            message: format!("no password available for '{username}'"),
        }),
        Err(other) => Err(other.into()),
    }
}
