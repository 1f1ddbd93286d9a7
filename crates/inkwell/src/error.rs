//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use inkwell_config::ConfigError;
use inkwell_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the backend at {url}")]
    #[diagnostic(
        code(inkwell::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Reason: {reason}\n\
             Try: inkwell status --origin <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(inkwell::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(inkwell::auth_failed),
        help(
            "Pass --username and set INKWELL_PASSWORD, or configure\n\
             username/password_env in the active profile."
        )
    )]
    AuthFailed { message: String },

    #[error("Not signed in: {reason}")]
    #[diagnostic(
        code(inkwell::not_signed_in),
        help("This command needs a session. Pass --username (and INKWELL_PASSWORD).")
    )]
    NotSignedIn { reason: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("{resource_type} {id} not found")]
    #[diagnostic(
        code(inkwell::not_found),
        help("Run: inkwell {resource_type} list")
    )]
    NotFound { resource_type: String, id: i64 },

    #[error("{message}")]
    #[diagnostic(code(inkwell::request_failed))]
    RequestFailed { status: u16, message: String },

    #[error("Failed to load {resource_type}: {message}")]
    #[diagnostic(code(inkwell::load_failed), help("Run with -v for request details."))]
    LoadFailed {
        resource_type: String,
        message: String,
    },

    #[error("Invalid response from backend: {message}")]
    #[diagnostic(code(inkwell::invalid_response))]
    InvalidResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(inkwell::validation))]
    Validation { field: String, reason: String },

    #[error("Nothing to update")]
    #[diagnostic(
        code(inkwell::empty_update),
        help("Pass at least one field to change, e.g. --title or --name.")
    )]
    EmptyUpdate,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(inkwell::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(inkwell::config),
        help("Production needs an origin: set it in the profile or pass --origin.")
    )]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(inkwell::config_file))]
    ConfigFile(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(inkwell::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(inkwell::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NotSignedIn { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::RequestFailed { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                _ => exit_code::GENERAL,
            },
            Self::Validation { .. }
            | Self::EmptyUpdate
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach a resource name to a bare 404 so the help text can point
    /// at the right list command.
    pub fn for_resource(self, resource_type: &str, id: i64) -> Self {
        match self {
            Self::RequestFailed { status: 404, .. } => Self::NotFound {
                resource_type: resource_type.into(),
                id,
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RequestFailed { status, message } => Self::RequestFailed { status, message },
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { url } => Self::Timeout { url },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::InvalidResponse { message } => Self::InvalidResponse { message },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}
