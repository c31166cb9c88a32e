// ── Core error types ──
//
// User-facing errors from merakly-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<merakly_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("No network selected")]
    MissingContext,

    // ── Remote errors ────────────────────────────────────────────────
    #[error("Cannot reach {service}: {reason}")]
    ConnectionFailed { service: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited by the Dashboard, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Language model error: {message}")]
    Completion { message: String },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether this error came from the Dashboard or the completion
    /// service, as opposed to local state or configuration.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::AuthenticationFailed { .. }
                | Self::RateLimited { .. }
                | Self::NotFound { .. }
                | Self::Api { .. }
                | Self::Completion { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<merakly_api::Error> for CoreError {
    fn from(err: merakly_api::Error) -> Self {
        use merakly_api::Error as ApiError;

        match err {
            ApiError::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "the Dashboard rejected the API key".into(),
            },
            ApiError::Forbidden { message } | ApiError::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ApiError::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                CoreError::ConnectionFailed {
                    service: e
                        .url()
                        .and_then(|u| u.host_str())
                        .unwrap_or("remote service")
                        .to_owned(),
                    reason: e.to_string(),
                }
            }
            ApiError::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            ApiError::Tls(message) => CoreError::Config { message },
            ApiError::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            ApiError::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                identifier: message,
            },
            ApiError::Api { message, status } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Completion { message, status } => CoreError::Completion {
                message: format!("HTTP {status}: {message}"),
            },
            ApiError::Deserialization { message, .. } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}
