//! CLI configuration: thin wrapper around `merakly_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --api-key, --org, --network, --timeout).

use secrecy::SecretString;

use merakly_core::AssistantConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use merakly_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

// ── Profile selection ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// The active profile. A profile named with `--profile` must exist;
/// otherwise an absent profile falls back to defaults so env-only
/// setups (`MERAKI_API_KEY` + flags) work without a config file.
pub fn active_profile(global: &GlobalOpts, config: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, config);
    match config.profiles.get(&name) {
        Some(profile) => Ok((name, profile.clone())),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            available: available_profiles(config),
            name,
        }),
        None => Ok((name, Profile::default())),
    }
}

// ── Assistant config ────────────────────────────────────────────────

/// Translate a `Profile` + global flags into an `AssistantConfig`.
///
/// Fails before any remote call when no API key can be found.
pub fn build_assistant_config(
    global: &GlobalOpts,
    profile_name: &str,
    profile: &Profile,
) -> Result<AssistantConfig, CliError> {
    let api_key = resolve_api_key_with_flag(profile, profile_name, global)?;

    let mut profile = profile.clone();
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    Ok(merakly_config::profile_to_assistant_config(&profile, api_key)?)
}

/// Resolve API key with CLI flag override, then fall through to shared resolution.
fn resolve_api_key_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        if !key.trim().is_empty() {
            return Ok(SecretString::from(key.clone()));
        }
    }
    Ok(merakly_config::resolve_api_key(profile, profile_name)?)
}

// ── Org / network selection ─────────────────────────────────────────

/// Organization and network requested by flags, falling back to the profile.
/// Both are still unresolved ids or names.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub org: Option<String>,
    pub network: Option<String>,
}

impl Selection {
    pub fn from_flags(global: &GlobalOpts, profile: &Profile) -> Self {
        Self {
            org: global.org.clone().or_else(|| profile.organization.clone()),
            network: global.network.clone().or_else(|| profile.network.clone()),
        }
    }
}
