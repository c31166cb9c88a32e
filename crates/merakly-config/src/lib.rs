//! Configuration for the merakly CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `merakly_core::AssistantConfig`. The CLI layers
//! its `GlobalOpts` overrides on top.

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
use tracing::debug;

use merakly_core::{AssistantConfig, DashboardClient, DashboardConfig, LlmConfig, OllamaClient};

/// Environment variable consulted before anything else for the API key.
pub const API_KEY_ENV: &str = "MERAKI_API_KEY";

const KEYRING_SERVICE: &str = "merakly";
const DEFAULT_LLM_TEMPERATURE: f32 = 0.1;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(String),

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
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Dashboard profiles.
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
    /// The profile name to use when none is given on the command line.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
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

/// A named Dashboard profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Dashboard API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (plaintext; prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Organization selected at startup (id or name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Network selected at startup (id or name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Ollama server root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_temperature: Option<f32>,

    /// Generation timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_timeout: Option<u64>,

    /// Path to custom CA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override API timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: None,
            organization: None,
            network: None,
            llm_url: None,
            llm_model: None,
            llm_temperature: None,
            llm_timeout: None,
            ca_cert: None,
            timeout: None,
        }
    }
}

fn default_base_url() -> String {
    DashboardClient::DEFAULT_BASE_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "merakly", "merakly").map_or_else(
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
    p.push("merakly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + `MERAKLY_`-prefixed environment variables.
///
/// Nested keys use a double underscore, e.g.
/// `MERAKLY_PROFILES__DEFAULT__NETWORK=HQ`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MERAKLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
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

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the API key from the process environment, the keyring, or
/// the profile.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(
        profile,
        profile_name,
        |var| std::env::var(var).ok(),
        keyring_lookup,
    )
}

/// Credential chain with injectable lookups:
/// `MERAKI_API_KEY` → profile's `api_key_env` → keyring → plaintext.
/// Blank values are skipped.
pub fn resolve_api_key_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    let present = |v: &String| !v.trim().is_empty();

    // 1. Well-known env var
    if let Some(val) = env(API_KEY_ENV).filter(present) {
        return Ok(SecretString::from(val));
    }

    // 2. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Some(val) = env(env_name).filter(present) {
            return Ok(SecretString::from(val));
        }
    }

    // 3. System keyring
    if let Some(secret) = keyring(profile_name).filter(present) {
        return Ok(SecretString::from(secret));
    }

    // 4. Plaintext in config
    if let Some(key) = profile.api_key.clone().filter(present) {
        return Ok(SecretString::from(key));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/api-key")
}

fn keyring_lookup(profile_name: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
        .and_then(|entry| entry.get_password())
        .ok()
}

/// Store an API key in the system keyring for `profile_name`.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
        .and_then(|entry| entry.set_password(key))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build an `AssistantConfig` from a profile and an already-resolved key.
pub fn profile_to_assistant_config(
    profile: &Profile,
    api_key: SecretString,
) -> Result<AssistantConfig, ConfigError> {
    let base_url = parse_url("base_url", &profile.base_url)?;
    let llm_url = parse_url(
        "llm_url",
        profile.llm_url.as_deref().unwrap_or(OllamaClient::DEFAULT_BASE_URL),
    )?;

    let temperature = profile.llm_temperature.unwrap_or(DEFAULT_LLM_TEMPERATURE);
    if !(0.0..=2.0).contains(&temperature) {
        return Err(ConfigError::Validation {
            field: "llm_temperature".into(),
            reason: format!("expected 0.0..=2.0, got {temperature}"),
        });
    }

    Ok(AssistantConfig {
        dashboard: DashboardConfig {
            base_url,
            api_key,
            timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
            ca_cert: profile.ca_cert.clone(),
        },
        llm: LlmConfig {
            base_url: llm_url,
            model: profile
                .llm_model
                .clone()
                .unwrap_or_else(|| OllamaClient::DEFAULT_MODEL.into()),
            temperature,
            timeout: Duration::from_secs(profile.llm_timeout.unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)),
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    fn no_keyring(_: &str) -> Option<String> {
        None
    }

    fn profile_with_everything() -> Profile {
        Profile {
            api_key: Some("plain".into()),
            api_key_env: Some("ACME_KEY".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn well_known_env_var_wins() {
        let env = env_of(&[("MERAKI_API_KEY", "from-env"), ("ACME_KEY", "acme")]);
        let key = resolve_api_key_with(&profile_with_everything(), "default", env, |_| {
            Some("ring".into())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "from-env");
    }

    #[test]
    fn profile_env_var_beats_keyring() {
        let env = env_of(&[("ACME_KEY", "acme")]);
        let key = resolve_api_key_with(&profile_with_everything(), "default", env, |_| {
            Some("ring".into())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "acme");
    }

    #[test]
    fn keyring_beats_plaintext() {
        let key = resolve_api_key_with(&profile_with_everything(), "lab", env_of(&[]), |name| {
            (name == "lab").then(|| "ring".to_owned())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "ring");
    }

    #[test]
    fn plaintext_is_last_resort() {
        let key =
            resolve_api_key_with(&profile_with_everything(), "default", env_of(&[]), no_keyring)
                .unwrap();
        assert_eq!(key.expose_secret(), "plain");
    }

    #[test]
    fn blank_values_are_not_credentials() {
        let profile = Profile {
            api_key: Some("   ".into()),
            ..Profile::default()
        };
        let err = resolve_api_key_with(
            &profile,
            "default",
            env_of(&[("MERAKI_API_KEY", "")]),
            no_keyring,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { profile } if profile == "default"));
    }

    #[test]
    fn profile_defaults_translate() {
        let cfg = profile_to_assistant_config(&Profile::default(), SecretString::from("k")).unwrap();
        assert_eq!(cfg.dashboard.base_url.as_str(), "https://api.meraki.com/api/v1");
        assert_eq!(cfg.dashboard.timeout, Duration::from_secs(30));
        assert_eq!(cfg.llm.base_url.as_str(), "http://localhost:11434/");
        assert_eq!(cfg.llm.model, "mistral");
        assert_eq!(cfg.llm.timeout, Duration::from_secs(120));
        assert!((cfg.llm.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn defaults_come_from_the_clients() {
        let profile = Profile::default();
        assert_eq!(profile.base_url, DashboardClient::DEFAULT_BASE_URL);
        let cfg = profile_to_assistant_config(&profile, SecretString::from("k")).unwrap();
        assert_eq!(cfg.llm.model, OllamaClient::DEFAULT_MODEL);
        assert!(cfg.llm.base_url.as_str().starts_with(OllamaClient::DEFAULT_BASE_URL));
    }

    #[test]
    fn bad_urls_and_temperatures_are_rejected() {
        let profile = Profile {
            base_url: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_assistant_config(&profile, SecretString::from("k")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"));

        let profile = Profile {
            llm_temperature: Some(7.5),
            ..Profile::default()
        };
        let err = profile_to_assistant_config(&profile, SecretString::from("k")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "llm_temperature"));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                network: Some("HQ".into()),
                llm_model: Some("llama3".into()),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("lab".into());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.active_profile_name(), "lab");
        let lab = &loaded.profiles["lab"];
        assert_eq!(lab.network.as_deref(), Some("HQ"));
        assert_eq!(lab.llm_model.as_deref(), Some("llama3"));
        assert_eq!(lab.base_url, "https://api.meraki.com/api/v1");
        assert_eq!(loaded.defaults.output, "table");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.active_profile_name(), "default");
        assert!(loaded.profiles.is_empty());
        assert_eq!(loaded.defaults.timeout, 30);
    }
}
