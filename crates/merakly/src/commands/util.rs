//! Shared helpers for command handlers.

use serde_json::Value;

use merakly_core::{Assistant, CoreError, DashboardClient, OllamaClient, Record, Session};

use crate::config::Selection;
use crate::error::CliError;

/// The production assistant: Dashboard gateway + Ollama completer.
pub type Dashboard = Assistant<DashboardClient, OllamaClient>;

/// Render one record field as a table cell.
pub fn field(record: &Record, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// The record's `id`, whether the Dashboard sent it as a string or a number.
pub fn id_of(record: &Record) -> String {
    field(record, "id")
}

/// Dashboard network ids carry an `N_` or `L_` prefix.
pub fn looks_like_network_id(needle: &str) -> bool {
    needle.starts_with("N_") || needle.starts_with("L_")
}

fn not_found(resource_type: &str, list_command: &str) -> impl Fn(CoreError) -> CliError {
    let resource_type = resource_type.to_owned();
    let list_command = list_command.to_owned();
    move |err| match err {
        CoreError::NotFound { identifier } => CliError::NotFound {
            resource_type: resource_type.clone(),
            identifier,
            list_command: list_command.clone(),
        },
        other => other.into(),
    }
}

/// Resolve an organization id. With no `--org`, a key that sees exactly
/// one organization selects it implicitly.
pub async fn resolve_org(assistant: &Dashboard, org: Option<&str>) -> Result<String, CliError> {
    if let Some(needle) = org {
        let record = assistant
            .find_org(needle)
            .await
            .map_err(not_found("organization", "orgs list"))?;
        return Ok(id_of(&record));
    }

    let orgs = assistant
        .gateway()
        .list_organizations()
        .await
        .map_err(CoreError::from)?;
    match orgs.as_slice() {
        [only] => Ok(id_of(only)),
        _ => Err(CliError::NoSelection {
            what: "organization".into(),
            flag: "org".into(),
        }),
    }
}

/// Resolve a network id from an id or a name within the organization.
pub async fn resolve_network_in(
    assistant: &Dashboard,
    org: Option<&str>,
    needle: &str,
) -> Result<String, CliError> {
    if looks_like_network_id(needle) {
        return Ok(needle.to_owned());
    }
    let org_id = resolve_org(assistant, org).await?;
    let record = assistant
        .find_network(&org_id, needle)
        .await
        .map_err(not_found("network", "networks list"))?;
    Ok(id_of(&record))
}

/// The network every network-scoped command operates on.
pub async fn require_network(assistant: &Dashboard, selection: &Selection) -> Result<String, CliError> {
    let needle = selection.network.as_deref().ok_or_else(|| CliError::NoSelection {
        what: "network".into(),
        flag: "network".into(),
    })?;
    resolve_network_in(assistant, selection.org.as_deref(), needle).await
}

/// Build a chat session from the requested selection. Nothing selected
/// is fine; chat still answers general questions.
pub async fn session_from(assistant: &Dashboard, selection: &Selection) -> Result<Session, CliError> {
    let mut session = Session::new();
    if let Some(ref org) = selection.org {
        session.select_org(resolve_org(assistant, Some(org)).await?);
    }
    if let Some(ref network) = selection.network {
        let id = resolve_network_in(assistant, session.org_id(), network).await?;
        session.select_network(id);
    }
    Ok(session)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
