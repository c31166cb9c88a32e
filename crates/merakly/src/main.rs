mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use merakly_core::Assistant;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // A .env in the working directory may carry MERAKI_API_KEY
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a Dashboard connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "merakly", &mut std::io::stdout());
            Ok(())
        }

        // Everything else needs an API key; resolve it before any remote call
        cmd => {
            let cfg = config::load_config_or_default();
            let (profile_name, profile) = config::active_profile(&cli.global, &cfg)?;
            let assistant_config =
                config::build_assistant_config(&cli.global, &profile_name, &profile)?;
            let assistant = Assistant::from_config(&assistant_config)?;
            let selection = config::Selection::from_flags(&cli.global, &profile);

            tracing::debug!(command = ?cmd, profile = %profile_name, "dispatching command");
            commands::dispatch(cmd, &assistant, &selection, &cli.global).await
        }
    }
}
