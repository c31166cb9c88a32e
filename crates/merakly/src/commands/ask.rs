//! One-shot question: a single chat turn.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::cli::{AskArgs, GlobalOpts, OutputFormat};
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

#[derive(Serialize)]
struct Answer<'a> {
    query: &'a str,
    route: String,
    reply: &'a str,
}

/// Spinner shown on stderr while a turn runs; hidden when stderr is not a TTY.
pub fn thinking_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub async fn handle(
    assistant: &Dashboard,
    args: AskArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = args.query.join(" ");
    let mut session = util::session_from(assistant, selection).await?;

    let spinner = thinking_spinner(global.quiet);
    let reply = assistant.turn(&mut session, &query).await;
    spinner.finish_and_clear();

    let out = match global.output {
        OutputFormat::Table | OutputFormat::Plain => reply.text,
        _ => output::render_single(
            &global.output,
            &Answer {
                query: &query,
                route: format!("{:?}", reply.route),
                reply: &reply.text,
            },
            |a| a.reply.to_owned(),
            |a| a.reply.to_owned(),
        ),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
