//! Device command handlers.

use merakly_core::CoreError;

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::Selection;
use crate::error::CliError;

use super::util::{self, Dashboard};

pub async fn handle(
    assistant: &Dashboard,
    args: DevicesArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::Reboot { serial } => {
            if !util::confirm(&format!("Reboot device {serial}?"), global.yes)? {
                return Ok(());
            }
            let result = assistant
                .gateway()
                .reboot_device(&serial)
                .await
                .map_err(CoreError::from)?;

            // The Dashboard answers {"success": bool}
            if result.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
                return Err(CliError::ApiError {
                    message: format!("reboot of {serial} was not accepted"),
                });
            }
            if !global.quiet {
                eprintln!("Reboot requested for {serial}");
            }
            Ok(())
        }

        DevicesCommand::Claim { serials } => {
            let network_id = util::require_network(assistant, selection).await?;
            assistant
                .gateway()
                .claim_devices(&network_id, &serials)
                .await
                .map_err(CoreError::from)?;
            if !global.quiet {
                eprintln!("Claimed {} device(s) into {network_id}", serials.len());
            }
            Ok(())
        }
    }
}
