//! Conversational routing layer between `merakly-api` and the CLI.
//!
//! One chat turn flows through a fixed pipeline:
//!
//! - **[`sentiment`]**: affect pre-filter. A clearly negative query
//!   short-circuits the turn with a canned empathetic reply.
//! - **[`intent`]**: ordered keyword rules mapping the query to a
//!   [`ToolId`], or [`Intent::Fallback`] when nothing matches.
//! - **[`dispatch`]**: runs the matched tool against a [`Gateway`] for the
//!   network selected in the [`Session`]. Remote failures come back as text.
//! - **[`fallback`]**: forwards unmatched queries to a [`Completer`] with a
//!   fixed persona prompt.
//! - **[`format`]**: renders record lists as Markdown tables and
//!   everything else as plain text.
//!
//! [`Assistant`] ties the stages together and records each turn in the
//! session transcript.

pub mod assistant;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod format;
pub mod gateway;
pub mod intent;
pub mod sentiment;
pub mod session;
pub mod vpn;

// ── Primary re-exports ──────────────────────────────────────────────
pub use assistant::{Assistant, Reply, Route};
pub use config::{AssistantConfig, DashboardConfig, LlmConfig};
pub use dispatch::{RawResult, dispatch};
pub use error::CoreError;
pub use format::format_result;
pub use gateway::{Completer, Gateway};
pub use intent::{Intent, ToolId, match_intent};
pub use session::{MapPoint, Role, Session, Turn};

pub use merakly_api::{
    DashboardClient, FirewallRule, FirewallRuleUpdate, MAX_SSID_NUMBER, NetworkUpdate, NewNetwork,
    NewVlan, OllamaClient, Record, SsidUpdate, SwitchPortUpdate, VlanUpdate,
};
