//! VLAN command handlers.

use tabled::Tabled;

use merakly_core::{CoreError, NewVlan, Record, VlanUpdate};

use crate::cli::{GlobalOpts, VlansArgs, VlansCommand};
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

#[derive(Tabled)]
struct VlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Subnet")]
    subnet: String,
    #[tabled(rename = "Appliance IP")]
    appliance_ip: String,
}

impl From<&Record> for VlanRow {
    fn from(r: &Record) -> Self {
        Self {
            id: util::id_of(r),
            name: util::field(r, "name"),
            subnet: util::field(r, "subnet"),
            appliance_ip: util::field(r, "applianceIp"),
        }
    }
}

fn vlan_summary(r: &Record) -> String {
    format!(
        "VLAN {} '{}' {} via {}",
        util::id_of(r),
        util::field(r, "name"),
        util::field(r, "subnet"),
        util::field(r, "applianceIp")
    )
}

pub async fn handle(
    assistant: &Dashboard,
    args: VlansArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let network_id = util::require_network(assistant, selection).await?;

    match args.command {
        VlansCommand::List => {
            let vlans = assistant
                .gateway()
                .list_vlans(&network_id)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &vlans,
                |r| VlanRow::from(r),
                util::id_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VlansCommand::Create {
            id,
            name,
            subnet,
            appliance_ip,
        } => {
            let vlan = NewVlan {
                id: id.to_string(),
                name,
                subnet,
                appliance_ip,
            };
            let created = assistant
                .gateway()
                .create_vlan(&network_id, &vlan)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_single(&global.output, &created, vlan_summary, util::id_of);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VlansCommand::Update {
            id,
            name,
            subnet,
            appliance_ip,
        } => {
            if name.is_none() && subnet.is_none() && appliance_ip.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name, --subnet or --appliance-ip".into(),
                });
            }
            let update = VlanUpdate {
                name,
                subnet,
                appliance_ip,
            };
            let updated = assistant
                .gateway()
                .update_vlan(&network_id, &id.to_string(), &update)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_single(&global.output, &updated, vlan_summary, util::id_of);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
