// ── Session context ──
//
// Everything that outlives a single chat turn: the operator's selected
// organization and network, the transcript, and the device map buffer.
// Owned by the caller and passed by reference into each turn.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// A device location extracted from a device listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default)]
pub struct Session {
    org_id: Option<String>,
    network_id: Option<String>,
    transcript: Vec<Turn>,
    map_points: Vec<MapPoint>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a preselected organization and network.
    pub fn with_selection(org_id: Option<String>, network_id: Option<String>) -> Self {
        let mut session = Self::new();
        session.org_id = org_id.filter(|id| !id.trim().is_empty());
        session.network_id = network_id.filter(|id| !id.trim().is_empty());
        session
    }

    // ── Selection ────────────────────────────────────────────────────

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    /// The selected network, or `None` if nothing usable is selected.
    pub fn network_id(&self) -> Option<&str> {
        self.network_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Switch organization. The network selection belonged to the old
    /// organization, so it is dropped along with any map data.
    pub fn select_org(&mut self, org_id: impl Into<String>) {
        let org_id = org_id.into();
        if self.org_id.as_deref() != Some(org_id.as_str()) {
            self.network_id = None;
            self.map_points.clear();
        }
        self.org_id = Some(org_id);
    }

    pub fn select_network(&mut self, network_id: impl Into<String>) {
        let network_id = network_id.into();
        if self.network_id.as_deref() != Some(network_id.as_str()) {
            self.map_points.clear();
        }
        self.network_id = Some(network_id);
    }

    pub fn clear_network(&mut self) {
        self.network_id = None;
        self.map_points.clear();
    }

    // ── Transcript ───────────────────────────────────────────────────

    pub fn record(&mut self, role: Role, text: impl Into<String>) {
        self.transcript.push(Turn {
            role,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    // ── Map buffer ───────────────────────────────────────────────────

    pub fn map_points(&self) -> &[MapPoint] {
        &self.map_points
    }

    pub(crate) fn replace_map_points(&mut self, points: Vec<MapPoint>) {
        self.map_points = points;
    }
}
