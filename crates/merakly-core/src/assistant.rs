// ── Assistant facade ──
//
// Runs one chat turn end to end:
// sentiment gate -> intent match -> dispatch | fallback -> format.

use merakly_api::{
    DashboardClient, GenerateOptions, OllamaClient, Record, TransportConfig,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AssistantConfig;
use crate::dispatch::dispatch;
use crate::error::CoreError;
use crate::fallback;
use crate::format::format_result;
use crate::gateway::{Completer, Gateway};
use crate::intent::{Intent, ToolId, match_intent};
use crate::sentiment;
use crate::session::{Role, Session};

pub const SELECT_NETWORK_FIRST: &str = "❌ Please select a network first.";

/// Which path a turn took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Negative sentiment; canned reply, nothing else ran.
    Empathy,
    /// A tool ran (its own failures are part of the text).
    Tool(ToolId),
    /// A tool matched but no network is selected.
    MissingContext,
    /// The language model answered.
    Fallback,
    /// The language model could not be reached.
    Failed,
}

/// Outcome of one turn: the route taken and the text to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub route: Route,
    pub text: String,
}

impl Reply {
    fn new(route: Route, text: impl Into<String>) -> Self {
        Self {
            route,
            text: text.into(),
        }
    }
}

/// The conversational front-end over a [`Gateway`] and a [`Completer`].
pub struct Assistant<G, C> {
    gateway: G,
    completer: C,
}

impl Assistant<DashboardClient, OllamaClient> {
    /// Build the production pair: Dashboard API client + Ollama.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, CoreError> {
        let dashboard_transport = TransportConfig {
            timeout: config.dashboard.timeout,
            ca_cert: config.dashboard.ca_cert.clone(),
        };
        let gateway = DashboardClient::from_api_key(
            config.dashboard.base_url.as_str(),
            &config.dashboard.api_key,
            &dashboard_transport,
        )?;

        let llm_transport = TransportConfig::default().with_timeout(config.llm.timeout);
        let completer = OllamaClient::new(
            config.llm.base_url.as_str(),
            config.llm.model.clone(),
            GenerateOptions {
                temperature: config.llm.temperature,
            },
            &llm_transport,
        )?;

        Ok(Self::new(gateway, completer))
    }
}

impl<G: Gateway, C: Completer> Assistant<G, C> {
    pub fn new(gateway: G, completer: C) -> Self {
        Self { gateway, completer }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn completer(&self) -> &C {
        &self.completer
    }

    /// Run one turn and record both sides of it in the transcript.
    pub async fn turn(&self, session: &mut Session, query: &str) -> Reply {
        session.record(Role::User, query);
        let reply = self.answer(session, query).await;
        session.record(Role::Assistant, reply.text.clone());
        reply
    }

    /// Run the pipeline for one query without touching the transcript.
    pub async fn answer(&self, session: &mut Session, query: &str) -> Reply {
        if let Some(message) = sentiment::evaluate(query) {
            info!("negative sentiment, skipping routing");
            return Reply::new(Route::Empathy, message);
        }

        match match_intent(query) {
            Intent::Tool(tool) => match dispatch(&self.gateway, tool, session).await {
                Ok(raw) => Reply::new(Route::Tool(tool), format_result(&raw)),
                Err(CoreError::MissingContext) => {
                    Reply::new(Route::MissingContext, SELECT_NETWORK_FIRST)
                }
                Err(err) => Reply::new(Route::Failed, format!("❌ Error: {err}")),
            },
            Intent::Fallback => match fallback::respond(&self.completer, query).await {
                Ok(answer) => Reply::new(Route::Fallback, answer),
                Err(err) => {
                    warn!(error = %err, "language model call failed");
                    Reply::new(Route::Failed, format!("❌ Error: {err}"))
                }
            },
        }
    }

    // ── Selection lookups ────────────────────────────────────────

    /// Find an organization by id or exact name.
    pub async fn find_org(&self, needle: &str) -> Result<Record, CoreError> {
        let orgs = self.gateway.list_organizations().await?;
        find_by_id_or_name(orgs, needle).ok_or_else(|| CoreError::NotFound {
            identifier: format!("organization '{needle}'"),
        })
    }

    /// Find a network of `org_id` by id or exact name.
    pub async fn find_network(&self, org_id: &str, needle: &str) -> Result<Record, CoreError> {
        let networks = self.gateway.list_networks(org_id).await?;
        find_by_id_or_name(networks, needle).ok_or_else(|| CoreError::NotFound {
            identifier: format!("network '{needle}'"),
        })
    }
}

/// Id match wins over name match; names are compared exactly.
fn find_by_id_or_name(records: Vec<Record>, needle: &str) -> Option<Record> {
    let field_is = |r: &Record, key: &str| r.get(key).and_then(Value::as_str) == Some(needle);
    let by_id = records.iter().position(|r| field_is(r, "id"));
    let index = by_id.or_else(|| records.iter().position(|r| field_is(r, "name")))?;
    records.into_iter().nth(index)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_match_beats_name_match() {
        let records: Vec<Record> = [
            json!({"id": "N_1", "name": "N_2"}),
            json!({"id": "N_2", "name": "Branch"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();

        let hit = find_by_id_or_name(records.clone(), "N_2").unwrap();
        assert_eq!(hit["name"], "Branch");

        let hit = find_by_id_or_name(records.clone(), "Branch").unwrap();
        assert_eq!(hit["id"], "N_2");

        assert!(find_by_id_or_name(records, "nope").is_none());
    }
}
