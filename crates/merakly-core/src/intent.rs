// ── Intent matching ──
//
// Free-text query -> tool, by ordered substring rules. The first rule
// with any matching keyword wins; rule order is part of the contract
// ("clients" beats "devices", "switch" beats "devices", ...).

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed set of read operations a chat query can trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ToolId {
    ListClients,
    ListDevices,
    ListSsids,
    ListVlans,
    ListAccessPoints,
    ListSwitches,
    ListUplinks,
    ListFirewallEvents,
    VpnStatus,
}

impl ToolId {
    /// What the tool fetches, for status and error lines.
    pub fn subject(self) -> &'static str {
        match self {
            Self::ListClients => "clients",
            Self::ListDevices => "devices",
            Self::ListSsids => "SSIDs",
            Self::ListVlans => "VLANs",
            Self::ListAccessPoints => "access points",
            Self::ListSwitches => "switches",
            Self::ListUplinks => "uplinks",
            Self::ListFirewallEvents => "firewall events",
            Self::VpnStatus => "VPN status",
        }
    }
}

/// Outcome of matching one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Tool(ToolId),
    /// No rule matched; the query goes to the language model.
    Fallback,
}

/// One routing rule: any keyword present selects `tool`.
#[derive(Debug)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub tool: ToolId,
}

/// Routing table, evaluated top to bottom.
pub const RULES: &[Rule] = &[
    Rule {
        keywords: &["clients"],
        tool: ToolId::ListClients,
    },
    Rule {
        keywords: &["vpn status"],
        tool: ToolId::VpnStatus,
    },
    Rule {
        keywords: &["vlan"],
        tool: ToolId::ListVlans,
    },
    Rule {
        keywords: &["switch", "switches"],
        tool: ToolId::ListSwitches,
    },
    Rule {
        keywords: &["access point", "ap "],
        tool: ToolId::ListAccessPoints,
    },
    Rule {
        keywords: &["firewall", "security events"],
        tool: ToolId::ListFirewallEvents,
    },
    Rule {
        keywords: &["devices"],
        tool: ToolId::ListDevices,
    },
    Rule {
        keywords: &["ssids", "wifi"],
        tool: ToolId::ListSsids,
    },
    Rule {
        keywords: &["uplinks"],
        tool: ToolId::ListUplinks,
    },
];

/// Match a query against [`RULES`] after lowercasing it.
pub fn match_intent(query: &str) -> Intent {
    let query = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| query.contains(*k)))
        .map_or(Intent::Fallback, |rule| Intent::Tool(rule.tool))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn clients_wins_over_devices() {
        for q in [
            "list clients and devices",
            "which devices have the most clients",
            "DEVICES with CLIENTS",
        ] {
            assert_eq!(match_intent(q), Intent::Tool(ToolId::ListClients), "{q}");
        }
    }

    #[test]
    fn each_rule_matches_its_keywords() {
        let cases = [
            ("show vpn status", ToolId::VpnStatus),
            ("what VLANs exist", ToolId::ListVlans),
            ("list my switches", ToolId::ListSwitches),
            ("any access point offline?", ToolId::ListAccessPoints),
            ("show ap list", ToolId::ListAccessPoints),
            ("recent security events", ToolId::ListFirewallEvents),
            ("firewall log", ToolId::ListFirewallEvents),
            ("list devices", ToolId::ListDevices),
            ("what ssids are broadcast", ToolId::ListSsids),
            ("wifi networks", ToolId::ListSsids),
            ("uplinks please", ToolId::ListUplinks),
        ];
        for (q, tool) in cases {
            assert_eq!(match_intent(q), Intent::Tool(tool), "{q}");
        }
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // "switch" precedes "devices"; "vlan" precedes "wifi"
        assert_eq!(
            match_intent("switch devices"),
            Intent::Tool(ToolId::ListSwitches)
        );
        assert_eq!(match_intent("wifi vlan"), Intent::Tool(ToolId::ListVlans));
        // "vpn status" only as a phrase
        assert_eq!(match_intent("vpn tunnels"), Intent::Fallback);
    }

    #[test]
    fn substring_matching_is_literal() {
        // "ap " needs the trailing space; "ap" at the end does not match
        assert_eq!(match_intent("show me the ap"), Intent::Fallback);
        // "switchport" still contains "switch"
        assert_eq!(
            match_intent("switchport config"),
            Intent::Tool(ToolId::ListSwitches)
        );
    }

    #[test]
    fn unmatched_queries_fall_back() {
        for q in ["tell me about EAP-TLS", "", "how do I configure radius?"] {
            assert_eq!(match_intent(q), Intent::Fallback, "{q}");
        }
    }

    #[test]
    fn tool_names_round_trip() {
        assert_eq!(ToolId::ListSsids.to_string(), "list_ssids");
        assert_eq!(ToolId::VpnStatus.to_string(), "vpn_status");
        for tool in ToolId::iter() {
            assert_eq!(ToolId::from_str(&tool.to_string()).unwrap(), tool);
        }
    }

    #[test]
    fn every_tool_has_a_rule() {
        for tool in ToolId::iter() {
            assert!(RULES.iter().any(|r| r.tool == tool), "{tool} has no rule");
        }
    }
}
