//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use merakly_config::ConfigError;
use merakly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const RATE_LIMITED: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {service}")]
    #[diagnostic(
        code(merakly::connection_failed),
        help(
            "Check network access to the Dashboard, or that Ollama is running \
             (ollama serve).\nReason: {reason}"
        )
    )]
    ConnectionFailed { service: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(merakly::auth_failed),
        help(
            "Verify the API key under Organization > Settings > Dashboard API access.\n\
             Store a new key with: merakly config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No Meraki API key configured for profile '{profile}'")]
    #[diagnostic(
        code(merakly::no_credentials),
        help(
            "Set MERAKI_API_KEY (a .env file works too), pass --api-key,\n\
             or run: merakly config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(merakly::not_found),
        help("Run: merakly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("No {what} selected")]
    #[diagnostic(
        code(merakly::no_selection),
        help(
            "Pass --{flag} <id|name>, or save a default: merakly config set {flag} <id|name>"
        )
    )]
    NoSelection { what: String, flag: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(merakly::api_error))]
    ApiError { message: String },

    #[error("Rate limited by the Dashboard")]
    #[diagnostic(
        code(merakly::rate_limited),
        help("Retry after {retry_after_secs}s.")
    )]
    RateLimited { retry_after_secs: u64 },

    #[error("Language model error: {message}")]
    #[diagnostic(
        code(merakly::llm),
        help("Check that the model is pulled: ollama pull <model>")
    )]
    Completion { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(merakly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(merakly::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: merakly config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(merakly::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::Validation { .. } | Self::NoSelection { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingContext => CliError::NoSelection {
                what: "network".into(),
                flag: "network".into(),
            },

            CoreError::ConnectionFailed { service, reason } => {
                CliError::ConnectionFailed { service, reason }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::RateLimited { retry_after_secs } => {
                CliError::RateLimited { retry_after_secs }
            }

            CoreError::NotFound { identifier } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier,
                list_command: "orgs list".into(),
            },

            CoreError::Api { message, .. } => CliError::ApiError { message },

            CoreError::Completion { message } => CliError::Completion { message },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
