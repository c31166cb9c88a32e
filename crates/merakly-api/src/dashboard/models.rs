// Request bodies for Dashboard API mutations.
//
// Responses are kept provider-native (`Record`): the assistant renders
// whatever fields the Dashboard returns, in the order it returns them.

use serde::{Deserialize, Serialize};

/// One provider-native JSON object (device, client, VLAN, SSID, ...).
///
/// Key order is the order the Dashboard sent them in.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// `POST /organizations/{organizationId}/networks`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNetwork {
    pub name: String,
    pub product_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// `PUT /networks/{networkId}` -- only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// `PUT /networks/{networkId}/wireless/ssids/{number}`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SsidUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
}

impl SsidUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.enabled.is_none()
            && self.auth_mode.is_none()
            && self.encryption_mode.is_none()
            && self.psk.is_none()
    }
}

/// `POST /networks/{networkId}/appliance/vlans`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVlan {
    pub id: String,
    pub name: String,
    pub subnet: String,
    pub appliance_ip: String,
}

/// `PUT /networks/{networkId}/appliance/vlans/{vlanId}`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appliance_ip: Option<String>,
}

/// `PUT /devices/{serial}/switch/ports/{portId}`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPortUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poe_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
}

/// `POST /networks/{networkId}/devices/claim`
#[derive(Debug, Clone, Serialize)]
pub struct DeviceClaim<'a> {
    pub serials: &'a [String],
}

/// Comment the Dashboard puts on the implicit last rule of every listing.
const DEFAULT_RULE_COMMENT: &str = "Default rule";

/// One layer-3 rule of an appliance firewall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub policy: String,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<String>,
    pub src_cidr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_port: Option<String>,
    pub dest_cidr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_enabled: Option<bool>,
}

impl FirewallRule {
    /// The read-only catch-all rule. It is listed but never written back.
    pub fn is_default(&self) -> bool {
        self.comment.as_deref() == Some(DEFAULT_RULE_COMMENT)
    }

    /// Overwrite the fields the update sets.
    pub fn apply(&mut self, update: FirewallRuleUpdate) {
        let FirewallRuleUpdate {
            comment,
            policy,
            protocol,
            src_port,
            src_cidr,
            dest_port,
            dest_cidr,
        } = update;
        if comment.is_some() {
            self.comment = comment;
        }
        if let Some(policy) = policy {
            self.policy = policy;
        }
        if let Some(protocol) = protocol {
            self.protocol = protocol;
        }
        if src_port.is_some() {
            self.src_port = src_port;
        }
        if let Some(src_cidr) = src_cidr {
            self.src_cidr = src_cidr;
        }
        if dest_port.is_some() {
            self.dest_port = dest_port;
        }
        if let Some(dest_cidr) = dest_cidr {
            self.dest_cidr = dest_cidr;
        }
    }
}

/// Partial change to one [`FirewallRule`].
#[derive(Debug, Clone, Default)]
pub struct FirewallRuleUpdate {
    pub comment: Option<String>,
    pub policy: Option<String>,
    pub protocol: Option<String>,
    pub src_port: Option<String>,
    pub src_cidr: Option<String>,
    pub dest_port: Option<String>,
    pub dest_cidr: Option<String>,
}

impl FirewallRuleUpdate {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none()
            && self.policy.is_none()
            && self.protocol.is_none()
            && self.src_port.is_none()
            && self.src_cidr.is_none()
            && self.dest_port.is_none()
            && self.dest_cidr.is_none()
    }
}

/// `GET`/`PUT /networks/{networkId}/appliance/firewall/l3FirewallRules`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct L3FirewallRules {
    #[serde(default)]
    pub rules: Vec<FirewallRule>,
}
