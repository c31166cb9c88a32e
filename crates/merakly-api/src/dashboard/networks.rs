// Dashboard network-scoped endpoints

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{DeviceClaim, NetworkUpdate, Record};
use crate::error::Error;

impl DashboardClient {
    /// `GET /networks/{networkId}`
    pub async fn get_network(&self, network_id: &str) -> Result<Record, Error> {
        debug!(network_id, "fetching network");
        self.get(&format!("networks/{network_id}")).await
    }

    /// Update network attributes. Unset fields are left untouched.
    ///
    /// `PUT /networks/{networkId}`
    pub async fn update_network(
        &self,
        network_id: &str,
        update: &NetworkUpdate,
    ) -> Result<Record, Error> {
        debug!(network_id, "updating network");
        self.put(&format!("networks/{network_id}"), update).await
    }

    /// Clients seen on the network (Dashboard default timespan).
    ///
    /// `GET /networks/{networkId}/clients`
    pub async fn list_clients(&self, network_id: &str) -> Result<Vec<Record>, Error> {
        debug!(network_id, "listing clients");
        self.get(&format!("networks/{network_id}/clients")).await
    }

    /// Devices claimed into the network.
    ///
    /// `GET /networks/{networkId}/devices`
    pub async fn list_devices(&self, network_id: &str) -> Result<Vec<Record>, Error> {
        debug!(network_id, "listing devices");
        self.get(&format!("networks/{network_id}/devices")).await
    }

    /// One page of the network event log for a product type.
    ///
    /// `GET /networks/{networkId}/events?productType=...`
    ///
    /// Returns the raw page (`{message, pageStartAt, pageEndAt, events}`).
    pub async fn list_network_events(
        &self,
        network_id: &str,
        product_type: &str,
    ) -> Result<Record, Error> {
        debug!(network_id, product_type, "listing network events");
        self.get_with_params(
            &format!("networks/{network_id}/events"),
            &[("productType", product_type.to_owned())],
        )
        .await
    }

    /// Claim devices into the network by serial.
    ///
    /// `POST /networks/{networkId}/devices/claim`
    ///
    /// Older API versions answer with an empty body, newer ones with the
    /// claimed serials; the raw answer is returned either way.
    pub async fn claim_devices(
        &self,
        network_id: &str,
        serials: &[String],
    ) -> Result<serde_json::Value, Error> {
        debug!(network_id, count = serials.len(), "claiming devices");
        self.post(
            &format!("networks/{network_id}/devices/claim"),
            &DeviceClaim { serials },
        )
        .await
    }
}
