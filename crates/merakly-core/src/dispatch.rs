// ── Tool dispatch ──
//
// Runs one matched tool against the gateway for the session's network.
// Only a missing network selection is an error; remote failures are
// logged and handed back as text so the turn still produces a reply.

use merakly_api::Record;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::intent::ToolId;
use crate::session::{MapPoint, Session};
use crate::vpn;

const SWITCH_MODEL_PREFIX: &str = "MS";
const ACCESS_POINT_MODEL_PREFIX: &str = "MR";

pub const NO_FIREWALL_EVENTS: &str = "No firewall events found for this network.";

/// Unformatted output of a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// Uniform records (devices, clients, VLANs, ...).
    Records(Vec<Record>),
    /// Any other structured payload.
    Value(Value),
    /// Notice or error text, shown as-is.
    Text(String),
}

/// Run `tool` for the network selected in `session`.
///
/// Fails with [`CoreError::MissingContext`] before touching the gateway if
/// no network is selected. For [`ToolId::ListDevices`] the session's map
/// buffer is replaced with the located devices.
pub async fn dispatch<G: Gateway>(
    gateway: &G,
    tool: ToolId,
    session: &mut Session,
) -> Result<RawResult, CoreError> {
    let network_id = session
        .network_id()
        .ok_or(CoreError::MissingContext)?
        .to_owned();

    info!(%tool, %network_id, "dispatching tool");

    let outcome = match tool {
        ToolId::ListClients => gateway.list_clients(&network_id).await.map(RawResult::Records),
        ToolId::ListDevices => gateway.list_devices(&network_id).await.map(|devices| {
            session.replace_map_points(map_points(&devices));
            RawResult::Records(devices)
        }),
        ToolId::ListSsids => gateway.list_ssids(&network_id).await.map(RawResult::Records),
        ToolId::ListVlans => gateway.list_vlans(&network_id).await.map(RawResult::Records),
        ToolId::ListAccessPoints => gateway
            .list_devices(&network_id)
            .await
            .map(|d| RawResult::Records(with_model_prefix(d, ACCESS_POINT_MODEL_PREFIX))),
        ToolId::ListSwitches => gateway
            .list_devices(&network_id)
            .await
            .map(|d| RawResult::Records(with_model_prefix(d, SWITCH_MODEL_PREFIX))),
        ToolId::ListUplinks => gateway.list_uplinks(&network_id).await.map(RawResult::Records),
        ToolId::ListFirewallEvents => {
            gateway
                .list_firewall_events(&network_id)
                .await
                .map(|events| {
                    if events.is_empty() {
                        RawResult::Text(NO_FIREWALL_EVENTS.into())
                    } else {
                        RawResult::Records(events)
                    }
                })
        }
        ToolId::VpnStatus => gateway.vpn_status(&network_id).await.map(|raw| {
            vpn::summarize(&raw)
                .and_then(|summary| serde_json::to_value(summary).ok())
                .map_or_else(|| RawResult::Text(vpn::NO_VPN_DATA.into()), RawResult::Value)
        }),
    };

    Ok(outcome.unwrap_or_else(|err| {
        warn!(%tool, %network_id, error = %err, "tool call failed");
        RawResult::Text(format!("❌ Error fetching {}: {err}", tool.subject()))
    }))
}

/// Derived device views: keep records whose `model` starts with `prefix`.
fn with_model_prefix(devices: Vec<Record>, prefix: &str) -> Vec<Record> {
    devices
        .into_iter()
        .filter(|d| {
            d.get("model")
                .and_then(Value::as_str)
                .is_some_and(|m| m.starts_with(prefix))
        })
        .collect()
}

/// Locations of devices that carry both a non-zero `lat` and `lng`.
fn map_points(devices: &[Record]) -> Vec<MapPoint> {
    devices
        .iter()
        .filter_map(|d| {
            let lat = d.get("lat").and_then(Value::as_f64)?;
            let lon = d.get("lng").and_then(Value::as_f64)?;
            (lat != 0.0 && lon != 0.0).then_some(MapPoint { lat, lon })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(v: Value) -> Record {
        match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn model_prefix_filter() {
        let devices = vec![
            record(json!({"serial": "a", "model": "MS120-8"})),
            record(json!({"serial": "b", "model": "MR46"})),
            record(json!({"serial": "c"})),
            record(json!({"serial": "d", "model": "MX68"})),
        ];
        let switches = with_model_prefix(devices.clone(), "MS");
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0]["serial"], "a");

        let aps = with_model_prefix(devices, "MR");
        assert_eq!(aps.len(), 1);
        assert_eq!(aps[0]["serial"], "b");
    }

    #[test]
    fn map_points_need_both_coordinates() {
        let devices = vec![
            record(json!({"lat": 37.5, "lng": -122.1})),
            record(json!({"lat": 37.5})),
            record(json!({"lat": 0.0, "lng": 0.0})),
            record(json!({"lat": null, "lng": 4.0})),
        ];
        assert_eq!(
            map_points(&devices),
            vec![MapPoint {
                lat: 37.5,
                lon: -122.1
            }]
        );
    }
}
