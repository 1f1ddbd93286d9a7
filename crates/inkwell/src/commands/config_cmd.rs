//! `inkwell config ...`: inspect and edit the config file without a backend.

use std::fmt::Write;

use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use inkwell_config::ConfigError;

use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    if let Some(env) = cfg.defaults.environment {
        let _ = writeln!(out, "environment = \"{env}\"");
    }

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        write_profile(&mut out, p);
    }

    out
}

fn write_profile(out: &mut String, p: &Profile) {
    if let Some(env) = p.environment {
        let _ = writeln!(out, "environment = \"{env}\"");
    }
    let strings = [
        ("origin", &p.origin),
        ("api_base", &p.api_base),
        ("auth_base", &p.auth_base),
        ("username", &p.username),
        ("password_env", &p.password_env),
    ];
    for (key, value) in strings {
        if let Some(v) = value {
            let _ = writeln!(out, "{key} = \"{v}\"");
        }
    }
    if p.password.is_some() {
        let _ = writeln!(out, "password = \"****\"");
    }
    if let Some(timeout) = p.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "User")]
    username: String,
    #[tabled(rename = "Default")]
    default: String,
}

#[derive(serde::Serialize)]
struct ProfileSummary {
    name: String,
    environment: Option<String>,
    origin: Option<String>,
    username: Option<String>,
    default: bool,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();

            let summaries: Vec<ProfileSummary> = names
                .into_iter()
                .map(|name| {
                    let p = &cfg.profiles[&name];
                    ProfileSummary {
                        default: name == active,
                        environment: p.environment.map(|e| e.to_string()),
                        origin: p.origin.clone(),
                        username: p.username.clone(),
                        name,
                    }
                })
                .collect();

            let out = output::render_list(
                &global.output,
                &summaries,
                |s| ProfileRow {
                    name: s.name.clone(),
                    environment: s.environment.clone().unwrap_or_default(),
                    origin: s.origin.clone().unwrap_or_default(),
                    username: s.username.clone().unwrap_or_default(),
                    default: if s.default { "*".into() } else { String::new() },
                },
                |s| s.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            profile.set(&key, &value).map_err(|e| match e {
                ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
                other => other.into(),
            })?;
            let path = config::save_config(&cfg)?;
            output::notice(
                &format!("Set {key} on profile '{profile_name}' in {}", path.display()),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(config::profile_not_found(name, &cfg));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::notice(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_config_masks_password() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                origin: Some("https://blog.example.com".into()),
                username: Some("editor".into()),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );

        let text = format_config_redacted(&cfg);
        assert!(text.contains("[profiles.prod]"));
        assert!(text.contains("origin = \"https://blog.example.com\""));
        assert!(text.contains("password = \"****\""));
        assert!(!text.contains("hunter2"));
    }
}
