//! Command dispatch: bridges CLI args -> Dashboard calls -> output formatting.

pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod devices;
pub mod firewall;
pub mod networks;
pub mod orgs;
pub mod ssids;
pub mod switch_ports;
pub mod util;
pub mod vlans;

use crate::cli::{Command, GlobalOpts};
use crate::config::Selection;
use crate::error::CliError;

use util::Dashboard;

/// Dispatch a Dashboard-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    assistant: &Dashboard,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Orgs(args) => orgs::handle(assistant, args, global).await,
        Command::Networks(args) => networks::handle(assistant, args, selection, global).await,
        Command::Ssids(args) => ssids::handle(assistant, args, selection, global).await,
        Command::Vlans(args) => vlans::handle(assistant, args, selection, global).await,
        Command::Devices(args) => devices::handle(assistant, args, selection, global).await,
        Command::Firewall(args) => firewall::handle(assistant, args, selection, global).await,
        Command::SwitchPorts(args) => switch_ports::handle(assistant, args, global).await,
        Command::Ask(args) => ask::handle(assistant, args, selection, global).await,
        Command::Chat => chat::handle(assistant, selection, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
