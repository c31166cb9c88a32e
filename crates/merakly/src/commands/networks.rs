//! Network command handlers.

use tabled::Tabled;

use merakly_core::{CoreError, NetworkUpdate, NewNetwork, Record};

use crate::cli::{GlobalOpts, NetworksArgs, NetworksCommand};
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Products")]
    products: String,
    #[tabled(rename = "Time Zone")]
    time_zone: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Record> for NetworkRow {
    fn from(r: &Record) -> Self {
        Self {
            id: util::id_of(r),
            name: util::field(r, "name"),
            products: util::field(r, "productTypes"),
            time_zone: util::field(r, "timeZone"),
            tags: util::field(r, "tags"),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    assistant: &Dashboard,
    args: NetworksArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworksCommand::List => {
            let org_id = util::resolve_org(assistant, selection.org.as_deref()).await?;
            let networks = assistant
                .gateway()
                .list_networks(&org_id)
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &networks,
                |r| NetworkRow::from(r),
                util::id_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NetworksCommand::Create {
            name,
            product_types,
            tags,
            time_zone,
        } => {
            let org_id = util::resolve_org(assistant, selection.org.as_deref()).await?;
            let mut product_types: Vec<String> = product_types
                .into_iter()
                .map(|p| p.as_api_str().to_owned())
                .collect();
            product_types.sort_unstable();
            product_types.dedup();

            let created = assistant
                .gateway()
                .create_network(
                    &org_id,
                    &NewNetwork {
                        name,
                        product_types,
                        tags,
                        time_zone,
                    },
                )
                .await
                .map_err(CoreError::from)?;

            if !global.quiet {
                eprintln!(
                    "Created network: {} (ID: {})",
                    util::field(&created, "name"),
                    util::id_of(&created)
                );
            }
            Ok(())
        }

        NetworksCommand::Update { name, tags } => {
            if name.is_none() && tags.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name and/or --tags".into(),
                });
            }
            let network_id = util::require_network(assistant, selection).await?;
            let updated = assistant
                .gateway()
                .update_network(
                    &network_id,
                    &NetworkUpdate {
                        name,
                        tags,
                        ..NetworkUpdate::default()
                    },
                )
                .await
                .map_err(CoreError::from)?;

            let out = output::render_single(
                &global.output,
                &updated,
                |r| format!("Updated network: {} (ID: {})", util::field(r, "name"), util::id_of(r)),
                util::id_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
