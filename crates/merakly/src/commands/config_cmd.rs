//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if p.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        let optional = [
            ("api_key_env", p.api_key_env.clone()),
            ("organization", p.organization.clone()),
            ("network", p.network.clone()),
            ("llm_url", p.llm_url.clone()),
            ("llm_model", p.llm_model.clone()),
            ("ca_cert", p.ca_cert.as_ref().map(|c| c.display().to_string())),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{key} = \"{value}\"");
            }
        }
        if let Some(t) = p.llm_temperature {
            let _ = writeln!(out, "llm_temperature = {t}");
        }
        if let Some(t) = p.llm_timeout {
            let _ = writeln!(out, "llm_timeout = {t}");
        }
        if let Some(t) = p.timeout {
            let _ = writeln!(out, "timeout = {t}");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_api_key() -> Result<String, CliError> {
    let key = rpassword::prompt_password("Meraki API key: ").map_err(prompt_err)?;
    let key = key.trim().to_owned();
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok(key)
}

fn parse_value<T: std::str::FromStr>(
    field: &str,
    value: &str,
    expected: &str,
) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Apply `key = value` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "base_url" | "base-url" => profile.base_url = value,
        "api_key" | "api-key" => profile.api_key = Some(value),
        "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
        "organization" | "org" => profile.organization = Some(value),
        "network" => profile.network = Some(value),
        "llm_url" | "llm-url" => profile.llm_url = Some(value),
        "llm_model" | "llm-model" => profile.llm_model = Some(value),
        "llm_temperature" | "llm-temperature" => {
            profile.llm_temperature = Some(parse_value(key, &value, "a number, e.g. 0.1")?);
        }
        "llm_timeout" | "llm-timeout" => {
            profile.llm_timeout = Some(parse_value(key, &value, "a number (seconds)")?);
        }
        "timeout" => profile.timeout = Some(parse_value(key, &value, "a number (seconds)")?),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: base_url, api_key, api_key_env, \
                     organization, network, llm_url, llm_model, llm_temperature, llm_timeout, \
                     timeout, ca_cert"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ merakly configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let key = prompt_api_key()?;
            let choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
                "Neither; I'll set MERAKI_API_KEY",
            ];
            let selection = Select::new()
                .with_prompt("Where to store the API key?")
                .items(choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            let api_key = match selection {
                0 => {
                    merakly_config::store_api_key(&profile_name, &key)?;
                    eprintln!("   ✓ API key stored in system keyring");
                    None
                }
                1 => Some(key),
                _ => None,
            };

            let network: String = Input::new()
                .with_prompt("Default network (id or name, blank for none)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let llm_model: String = Input::new()
                .with_prompt("Ollama model")
                .default("mistral".into())
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                api_key,
                network: Some(network.trim().to_owned()).filter(|n| !n.is_empty()),
                llm_model: Some(llm_model),
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: merakly orgs list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_value(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── SetKey ──────────────────────────────────────────────────
        ConfigCommand::SetKey { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.is_empty() && !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let key = prompt_api_key()?;
            merakly_config::store_api_key(&profile_name, &key)?;
            eprintln!("✓ API key stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use merakly_config::Defaults;

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_profile_value(&mut profile, "network", "HQ".into()).unwrap();
        set_profile_value(&mut profile, "llm-model", "llama3".into()).unwrap();
        set_profile_value(&mut profile, "timeout", "45".into()).unwrap();
        assert_eq!(profile.network.as_deref(), Some("HQ"));
        assert_eq!(profile.llm_model.as_deref(), Some("llama3"));
        assert_eq!(profile.timeout, Some(45));
    }

    #[test]
    fn reject_bad_values_and_keys() {
        let mut profile = Profile::default();
        assert!(set_profile_value(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_value(&mut profile, "controller", "x".into()).is_err());
    }

    #[test]
    fn show_masks_plaintext_key() {
        let mut cfg = Config {
            default_profile: Some("lab".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        };
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                api_key: Some("0123456789abcdef".into()),
                network: Some("HQ".into()),
                ..Profile::default()
            },
        );
        let shown = format_config_redacted(&cfg);
        assert!(shown.contains("api_key = \"****\""));
        assert!(!shown.contains("0123456789abcdef"));
        assert!(shown.contains("network = \"HQ\""));
    }
}
