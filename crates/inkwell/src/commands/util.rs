//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use chrono::{DateTime, Utc};

use inkwell_core::ResourceState;

use crate::cli::ContentArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Resolve `--content` / `--content-file` into the post body, if given.
pub fn read_content(args: &ContentArgs) -> Result<Option<String>, CliError> {
    if let Some(ref text) = args.content {
        return Ok(Some(text.clone()));
    }
    match args.content_file {
        Some(ref path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(Some(buf))
        }
        Some(ref path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

/// Fail if the last fetch for a kind recorded an error.
///
/// Store fetches never return errors, so list commands check the state.
pub fn ensure_loaded<T>(state: &ResourceState<T>, resource_type: &str) -> Result<(), CliError> {
    match state.error {
        Some(ref message) => Err(CliError::LoadFailed {
            resource_type: resource_type.into(),
            message: message.clone(),
        }),
        None => Ok(()),
    }
}

pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_opt_time(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_time).unwrap_or_default()
}

/// First line of `text`, cut to `max` characters.
pub fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        line.to_owned()
    }
}
