//! SSID command handlers.
//!
//! Dashboard SSIDs are fixed slots (0-14), so "create" configures a slot
//! and both subcommands issue the same update call.

use tabled::Tabled;

use merakly_core::{CoreError, Record, SsidUpdate};

use crate::cli::{AuthMode, GlobalOpts, SsidsArgs, SsidsCommand};
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

const MIN_PSK_LEN: usize = 8;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SsidRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Auth")]
    auth_mode: String,
    #[tabled(rename = "Visible")]
    visible: String,
}

impl From<&Record> for SsidRow {
    fn from(r: &Record) -> Self {
        Self {
            number: util::field(r, "number"),
            name: util::field(r, "name"),
            enabled: util::field(r, "enabled"),
            auth_mode: util::field(r, "authMode"),
            visible: util::field(r, "visible"),
        }
    }
}

fn slot_of(r: &Record) -> String {
    util::field(r, "number")
}

/// Build the update body, checking PSK rules up front.
fn ssid_update(
    name: Option<String>,
    enabled: Option<bool>,
    auth_mode: Option<AuthMode>,
    psk: Option<String>,
) -> Result<SsidUpdate, CliError> {
    if auth_mode == Some(AuthMode::Psk) && psk.is_none() {
        return Err(CliError::Validation {
            field: "psk".into(),
            reason: "auth mode 'psk' needs --psk".into(),
        });
    }
    if let Some(ref key) = psk {
        if key.chars().count() < MIN_PSK_LEN {
            return Err(CliError::Validation {
                field: "psk".into(),
                reason: format!("must be at least {MIN_PSK_LEN} characters"),
            });
        }
    }

    let encryption_mode = (auth_mode == Some(AuthMode::Psk)).then(|| "wpa".to_owned());
    Ok(SsidUpdate {
        name,
        enabled,
        auth_mode: auth_mode.map(|m| m.as_api_str().to_owned()),
        encryption_mode,
        psk,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    assistant: &Dashboard,
    args: SsidsArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let network_id = util::require_network(assistant, selection).await?;

    match args.command {
        SsidsCommand::List => {
            let ssids = assistant
                .gateway()
                .list_ssids(&network_id)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &ssids,
                |r| SsidRow::from(r),
                slot_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SsidsCommand::Create {
            number,
            name,
            disabled,
            auth_mode,
            psk,
        } => {
            let update = ssid_update(Some(name), Some(!disabled), Some(auth_mode), psk)?;
            let ssid = assistant
                .gateway()
                .update_ssid(&network_id, number, &update)
                .await
                .map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!(
                    "Created SSID: {} (#{})",
                    util::field(&ssid, "name"),
                    slot_of(&ssid)
                );
            }
            Ok(())
        }

        SsidsCommand::Update {
            number,
            name,
            enabled,
            auth_mode,
            psk,
        } => {
            let update = ssid_update(name, enabled, auth_mode, psk)?;
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name, --enabled, --auth-mode or --psk"
                        .into(),
                });
            }
            let ssid = assistant
                .gateway()
                .update_ssid(&network_id, number, &update)
                .await
                .map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!(
                    "Updated SSID: {} (#{})",
                    util::field(&ssid, "name"),
                    slot_of(&ssid)
                );
            }
            Ok(())
        }
    }
}
