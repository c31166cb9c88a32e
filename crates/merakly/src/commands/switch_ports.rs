//! Switch port command handlers.

use tabled::Tabled;

use merakly_core::{CoreError, Record, SwitchPortUpdate};

use crate::cli::{GlobalOpts, SwitchPortsArgs, SwitchPortsCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port")]
    port_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Type")]
    port_type: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "PoE")]
    poe: String,
}

impl From<&Record> for PortRow {
    fn from(r: &Record) -> Self {
        Self {
            port_id: port_of(r),
            name: util::field(r, "name"),
            enabled: util::field(r, "enabled"),
            port_type: util::field(r, "type"),
            vlan: util::field(r, "vlan"),
            poe: util::field(r, "poeEnabled"),
        }
    }
}

fn port_of(r: &Record) -> String {
    util::field(r, "portId")
}

pub async fn handle(
    assistant: &Dashboard,
    args: SwitchPortsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SwitchPortsCommand::List { serial } => {
            let ports = assistant
                .gateway()
                .list_switch_ports(&serial)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(&global.output, &ports, |r| PortRow::from(r), port_of);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SwitchPortsCommand::Update {
            serial,
            port,
            name,
            enabled,
            poe_enabled,
            vlan,
            port_type,
        } => {
            let update = SwitchPortUpdate {
                name,
                enabled,
                poe_enabled,
                vlan,
                port_type: port_type.map(|t| t.as_api_str().to_owned()),
            };
            let updated = assistant
                .gateway()
                .update_switch_port(&serial, &port, &update)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_single(
                &global.output,
                &updated,
                |r| format!("Updated port {} on {serial}", port_of(r)),
                port_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
