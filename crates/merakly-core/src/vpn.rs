// ── VPN status reshaping ──
//
// The Dashboard's appliance VPN status is reduced to the fields an operator
// reads at a glance: device status, Meraki (AutoVPN) peers, and
// third-party peers.

use serde::Serialize;
use serde_json::Value;

pub const NO_VPN_DATA: &str = "⚠️ No VPN status data available.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VpnSummary {
    #[serde(rename = "Device Status")]
    pub device_status: Value,
    #[serde(rename = "Meraki VPN Peers")]
    pub meraki_peers: Vec<MerakiPeer>,
    #[serde(rename = "Non-Meraki VPN Peers")]
    pub third_party_peers: Vec<ThirdPartyPeer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerakiPeer {
    #[serde(rename = "Peer Network ID")]
    pub network_id: Value,
    #[serde(rename = "Status")]
    pub status: Value,
    #[serde(rename = "Reachability")]
    pub reachability: Value,
    #[serde(rename = "Latency (ms)")]
    pub latency_ms: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThirdPartyPeer {
    #[serde(rename = "Public IP")]
    pub public_ip: Value,
    #[serde(rename = "Status")]
    pub status: Value,
    #[serde(rename = "Reachability")]
    pub reachability: Value,
}

/// Reshape a provider response. `None` when there is nothing to show
/// (null, empty object, or not an object at all).
pub fn summarize(raw: &Value) -> Option<VpnSummary> {
    let status = raw.as_object().filter(|m| !m.is_empty())?;

    let meraki_peers = peers(status.get("merakiVpnPeers"))
        .map(|peer| MerakiPeer {
            network_id: field(peer, "networkId"),
            status: field(peer, "status"),
            reachability: field(peer, "reachability"),
            latency_ms: field(peer, "latencyMs"),
        })
        .collect();

    let third_party_peers = peers(
        status
            .get("thirdPartyVpnPeers")
            .or_else(|| status.get("nonMerakiVpnPeers")),
    )
    .map(|peer| ThirdPartyPeer {
        public_ip: field(peer, "publicIp"),
        status: field(peer, "status"),
        reachability: field(peer, "reachability"),
    })
    .collect();

    Some(VpnSummary {
        device_status: status
            .get("deviceStatus")
            .cloned()
            .unwrap_or_else(|| Value::String("Unknown".into())),
        meraki_peers,
        third_party_peers,
    })
}

fn peers(list: Option<&Value>) -> impl Iterator<Item = &Value> {
    list.and_then(Value::as_array).into_iter().flatten()
}

fn field(peer: &Value, key: &str) -> Value {
    peer.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn reshapes_peers() {
        let raw = json!({
            "deviceStatus": "online",
            "merakiVpnPeers": [
                {"networkId": "N_2", "networkName": "HQ", "status": "up",
                 "reachability": "reachable", "latencyMs": 12}
            ],
            "thirdPartyVpnPeers": [
                {"publicIp": "203.0.113.9", "status": "down", "reachability": "unreachable"}
            ]
        });

        let summary = summarize(&raw).unwrap();
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "Device Status": "online",
                "Meraki VPN Peers": [{
                    "Peer Network ID": "N_2",
                    "Status": "up",
                    "Reachability": "reachable",
                    "Latency (ms)": 12
                }],
                "Non-Meraki VPN Peers": [{
                    "Public IP": "203.0.113.9",
                    "Status": "down",
                    "Reachability": "unreachable"
                }]
            })
        );
    }

    #[test]
    fn missing_fields_default() {
        let summary = summarize(&json!({"merakiVpnPeers": [{"networkId": "N_2"}]})).unwrap();
        assert_eq!(summary.device_status, json!("Unknown"));
        assert_eq!(summary.meraki_peers[0].latency_ms, Value::Null);
        assert!(summary.third_party_peers.is_empty());
    }

    #[test]
    fn non_meraki_alias_is_accepted() {
        let raw = json!({"nonMerakiVpnPeers": [{"publicIp": "198.51.100.1"}]});
        let summary = summarize(&raw).unwrap();
        assert_eq!(summary.third_party_peers[0].public_ip, json!("198.51.100.1"));
    }

    #[test]
    fn empty_status_has_no_summary() {
        assert_eq!(summarize(&Value::Null), None);
        assert_eq!(summarize(&json!({})), None);
        assert_eq!(summarize(&json!([])), None);
    }
}
