//! Interactive chat session.
//!
//! Free text goes through the assistant; lines starting with `/` drive
//! the session (selection, map buffer, history).

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Input;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use merakly_core::{MapPoint, Role, Session};

use crate::cli::GlobalOpts;
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::ask::thinking_spinner;
use super::util::{self, Dashboard};

const HELP: &str = "\
Ask about the selected network in plain language, e.g. \"list clients\",
\"show vlans\", \"vpn status\". Anything else goes to the language model.

  /org <id|name>      select an organization
  /network <id|name>  select a network
  /map                device locations from the last device listing
  /history            this session's transcript
  /help               this text
  /quit               leave";

// ── Slash commands ──────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum Slash<'a> {
    Org(&'a str),
    Network(&'a str),
    Map,
    History,
    Help,
    Quit,
    /// Known command with a missing argument.
    Usage(&'static str),
    Unknown(&'a str),
}

/// Parse a line that starts with `/`. `None` for ordinary chat text.
fn parse_slash(line: &str) -> Option<Slash<'_>> {
    let rest = line.strip_prefix('/')?;
    let (cmd, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(c, a)| (c, a.trim()));

    Some(match (cmd, arg) {
        ("org", "") => Slash::Usage("/org <id|name>"),
        ("org", needle) => Slash::Org(needle),
        ("network" | "net", "") => Slash::Usage("/network <id|name>"),
        ("network" | "net", needle) => Slash::Network(needle),
        ("map", _) => Slash::Map,
        ("history", _) => Slash::History,
        ("help" | "?", _) => Slash::Help,
        ("quit" | "exit" | "q", _) => Slash::Quit,
        (other, _) => Slash::Unknown(other),
    })
}

// ── Printing ────────────────────────────────────────────────────────

struct Painter {
    color: bool,
}

impl Painter {
    fn label(&self, role: Role) -> String {
        let name = match role {
            Role::User => "you",
            Role::Assistant => "merakly",
        };
        match (self.color, role) {
            (false, _) => name.to_owned(),
            (true, Role::User) => name.cyan().bold().to_string(),
            (true, Role::Assistant) => name.green().bold().to_string(),
        }
    }

    fn note(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Latitude")]
    lat: f64,
    #[tabled(rename = "Longitude")]
    lon: f64,
}

fn render_map(points: &[MapPoint]) -> Option<String> {
    if points.is_empty() {
        return None;
    }
    let rows: Vec<PointRow> = points
        .iter()
        .map(|p| PointRow {
            lat: p.lat,
            lon: p.lon,
        })
        .collect();
    Some(Table::new(rows).with(Style::rounded()).to_string())
}

fn render_history(session: &Session, painter: &Painter) -> String {
    session
        .transcript()
        .iter()
        .map(|turn| {
            format!(
                "{} {}\n{}",
                painter.note(&turn.at.format("%H:%M:%S").to_string()),
                painter.label(turn.role),
                turn.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ── Input ───────────────────────────────────────────────────────────

/// Next input line, or `None` at end of input.
fn read_line(interactive: bool, painter: &Painter) -> Option<String> {
    if interactive {
        return Input::<String>::new()
            .with_prompt(painter.label(Role::User))
            .allow_empty(true)
            .interact_text()
            .ok();
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    assistant: &Dashboard,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let painter = Painter {
        color: output::should_color(&global.color),
    };
    let interactive = io::stdin().is_terminal();
    let mut session = util::session_from(assistant, selection).await?;

    if interactive && !global.quiet {
        eprintln!("{}", painter.note("merakly chat -- /help for commands, /quit to leave"));
        if session.network_id().is_none() {
            eprintln!("{}", painter.note("No network selected yet: /network <id|name>"));
        }
        if !assistant.completer().is_available().await {
            eprintln!(
                "{}",
                painter.note("Ollama is not reachable; general questions will fail.")
            );
        }
    }

    while let Some(line) = read_line(interactive, &painter) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(slash) = parse_slash(line) {
            match slash {
                Slash::Quit => break,
                Slash::Help => println!("{HELP}"),
                Slash::Usage(usage) => println!("Usage: {usage}"),
                Slash::Unknown(cmd) => println!("Unknown command /{cmd}. Try /help"),
                Slash::Map => match render_map(session.map_points()) {
                    Some(map) => println!("{map}"),
                    None => println!("No device locations yet. Ask to list devices first."),
                },
                Slash::History => println!("{}", render_history(&session, &painter)),
                Slash::Org(needle) => match util::resolve_org(assistant, Some(needle)).await {
                    Ok(org_id) => {
                        session.select_org(org_id.clone());
                        println!("Organization: {org_id}");
                    }
                    Err(err) => println!("❌ {err}"),
                },
                Slash::Network(needle) => {
                    let resolved =
                        util::resolve_network_in(assistant, session.org_id(), needle).await;
                    match resolved {
                        Ok(network_id) => {
                            session.select_network(network_id.clone());
                            println!("Network: {network_id}");
                        }
                        Err(err) => println!("❌ {err}"),
                    }
                }
            }
            continue;
        }

        let spinner = thinking_spinner(global.quiet || !interactive);
        let reply = assistant.turn(&mut session, line).await;
        spinner.finish_and_clear();

        println!("{}\n{}\n", painter.label(Role::Assistant), reply.text);
    }

    Ok(())
}
