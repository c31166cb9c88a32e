// ── Remote collaborators ──
//
// The dispatcher and fallback responder only see these traits, so the
// pipeline can run against the real Dashboard / Ollama clients or against
// in-memory fakes.

use std::future::Future;

use merakly_api::{DashboardClient, OllamaClient, Record};
use serde_json::Value;

use crate::error::CoreError;

/// Event-log product type holding firewall and IDS events.
const FIREWALL_PRODUCT_TYPE: &str = "appliance";

/// Read operations the chat tools need from the management API.
pub trait Gateway {
    fn list_organizations(&self) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_networks(
        &self,
        org_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_clients(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_devices(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_vlans(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_ssids(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_uplinks(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn list_firewall_events(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    /// Provider-native VPN status; `Value::Null` when there is none.
    fn vpn_status(&self, network_id: &str)
    -> impl Future<Output = Result<Value, CoreError>> + Send;
}

/// Single-shot text completion.
pub trait Completer {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, CoreError>> + Send;
}

// ── Dashboard ────────────────────────────────────────────────────

impl Gateway for DashboardClient {
    async fn list_organizations(&self) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_organizations(self).await?)
    }

    async fn list_networks(&self, org_id: &str) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_networks(self, org_id).await?)
    }

    async fn list_clients(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_clients(self, network_id).await?)
    }

    async fn list_devices(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_devices(self, network_id).await?)
    }

    async fn list_vlans(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_vlans(self, network_id).await?)
    }

    async fn list_ssids(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        Ok(DashboardClient::list_ssids(self, network_id).await?)
    }

    async fn list_uplinks(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        let org_id = organization_of(self, network_id).await?;
        Ok(self.list_uplink_statuses(&org_id, network_id).await?)
    }

    async fn list_firewall_events(&self, network_id: &str) -> Result<Vec<Record>, CoreError> {
        let page = self
            .list_network_events(network_id, FIREWALL_PRODUCT_TYPE)
            .await?;
        Ok(events_of(page))
    }

    async fn vpn_status(&self, network_id: &str) -> Result<Value, CoreError> {
        let org_id = organization_of(self, network_id).await?;
        let statuses = self.list_vpn_statuses(&org_id, network_id).await?;
        Ok(status_of(statuses, network_id))
    }
}

/// Appliance status calls are organization-scoped; the network names its org.
async fn organization_of(client: &DashboardClient, network_id: &str) -> Result<String, CoreError> {
    let network = client.get_network(network_id).await?;
    match network.get("organizationId") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(CoreError::NotFound {
            identifier: format!("organization of network {network_id}"),
        }),
    }
}

/// The entry for `network_id` out of an org-wide status list; `Null` if absent.
fn status_of(statuses: Vec<Record>, network_id: &str) -> Value {
    statuses
        .into_iter()
        .find(|s| s.get("networkId").and_then(Value::as_str) == Some(network_id))
        .map_or(Value::Null, Value::Object)
}

/// Pull the event objects out of one event-log page.
fn events_of(mut page: Record) -> Vec<Record> {
    match page.remove("events") {
        Some(Value::Array(events)) => events
            .into_iter()
            .filter_map(|e| match e {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

// ── Ollama ───────────────────────────────────────────────────────

impl Completer for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, CoreError> {
        Ok(self.generate(prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_are_extracted_from_page() {
        let page = json!({
            "message": null,
            "events": [{"type": "ids_alerted"}, "junk", {"type": "port_scan"}]
        });
        let Value::Object(page) = page else {
            unreachable!()
        };
        let events = events_of(page);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["type"], "port_scan");
    }

    #[test]
    fn page_without_events_is_empty() {
        assert!(events_of(Record::new()).is_empty());
    }

    fn records(v: Value) -> Vec<Record> {
        let Value::Array(items) = v else {
            unreachable!()
        };
        items
            .into_iter()
            .filter_map(|i| match i {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn vpn_status_is_picked_by_network() {
        let statuses = records(json!([
            {"networkId": "N_2", "deviceStatus": "offline"},
            {"networkId": "N_1", "deviceStatus": "online"}
        ]));
        assert_eq!(status_of(statuses, "N_1")["deviceStatus"], "online");
    }

    #[test]
    fn vpn_status_for_other_networks_is_null() {
        let statuses = records(json!([{"networkId": "N_2"}]));
        assert!(status_of(statuses, "N_1").is_null());
        assert!(status_of(Vec::new(), "N_1").is_null());
    }
}
