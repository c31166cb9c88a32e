// ── Runtime connection configuration ──
//
// These types describe how to reach the Dashboard and the language model.
// They carry credential data and connection tuning, but never touch disk.
// The CLI builds an `AssistantConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Dashboard API connection settings.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API root (e.g., `https://api.meraki.com/api/v1`).
    pub base_url: Url,
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// Extra root certificate for TLS-intercepting proxies.
    pub ca_cert: Option<PathBuf>,
}

/// Local language model settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Ollama server root (e.g., `http://localhost:11434`).
    pub base_url: Url,
    pub model: String,
    pub temperature: f32,
    /// Local generation is slow; this is usually longer than the API timeout.
    pub timeout: Duration,
}

/// Everything needed to build an [`Assistant`](crate::Assistant).
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub dashboard: DashboardConfig,
    pub llm: LlmConfig,
}
