// ── Core error types ──
//
// Errors surfaced by Store actions. The store only ever records an error's
// message, so every variant renders a self-contained sentence and
// `RequestFailed` renders the server's message verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── HTTP failures ────────────────────────────────────────────────
    /// The backend answered with a failure status.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Invalid response from backend: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if no response was obtained from the backend.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Timeout { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<inkwell_api::Error> for CoreError {
    fn from(err: inkwell_api::Error) -> Self {
        match err {
            inkwell_api::Error::RequestFailed { status, message } => {
                Self::RequestFailed { status, message }
            }
            inkwell_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    Self::Timeout { url }
                } else {
                    Self::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            inkwell_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            inkwell_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            inkwell_api::Error::Deserialization { message, body: _ } => {
                Self::InvalidResponse { message }
            }
            err @ inkwell_api::Error::UnexpectedPayload { .. } => Self::InvalidResponse {
                message: err.to_string(),
            },
        }
    }
}
