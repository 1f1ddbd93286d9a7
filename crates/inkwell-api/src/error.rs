use thiserror::Error;

/// Top-level error type for the `inkwell-api` crate.
///
/// Two conditions matter to callers: the server answered with a failure
/// status ([`RequestFailed`](Self::RequestFailed)) or no response was
/// obtained at all ([`Transport`](Self::Transport)). Both carry a
/// human-readable [`message`](Self::message), which is all the store
/// records; the status is kept for front ends that map it to exit codes.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP failure ────────────────────────────────────────────────
    /// Non-2xx response. The message is the server's `detail`/`message`
    /// field, the raw body text, or `"HTTP <code>: <reason>"`.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Session ─────────────────────────────────────────────────────
    /// Form login was rejected (no session cookie issued).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A typed call received a non-JSON success body.
    #[error("Expected a JSON response, got {content_type}")]
    UnexpectedPayload { content_type: String },
}

impl Error {
    /// The caller-facing message, without any variant prefix for HTTP failures.
    pub fn message(&self) -> String {
        match self {
            Self::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if no HTTP response was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_is_bare() {
        let err = Error::RequestFailed {
            status: 401,
            message: "Authentication required".into(),
        };
        assert_eq!(err.to_string(), "Authentication required");
        assert_eq!(err.message(), "Authentication required");
        assert!(!err.is_transport());
    }

    #[test]
    fn other_variants_keep_prefix() {
        let err = Error::Authentication {
            message: "no session cookie".into(),
        };
        assert_eq!(err.message(), "Authentication failed: no session cookie");
    }
}
