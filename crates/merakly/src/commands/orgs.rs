//! Organization command handlers.

use tabled::Tabled;

use merakly_core::{CoreError, Record};

use crate::cli::{GlobalOpts, OrgsArgs, OrgsCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrgRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Record> for OrgRow {
    fn from(r: &Record) -> Self {
        Self {
            id: util::id_of(r),
            name: util::field(r, "name"),
            url: util::field(r, "url"),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    assistant: &Dashboard,
    args: OrgsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrgsCommand::List => {
            let orgs = assistant
                .gateway()
                .list_organizations()
                .await
                .map_err(CoreError::from)?;
            let out = output::render_list(
                &global.output,
                &orgs,
                |r| OrgRow::from(r),
                util::id_of,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
