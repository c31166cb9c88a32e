// Dashboard wireless endpoints
//
// SSIDs are fixed slots (0-14) per network: "creating" one means
// configuring an unused slot, so both directions go through PUT.

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{Record, SsidUpdate};
use crate::error::Error;

/// Highest SSID slot number on a Meraki network.
pub const MAX_SSID_NUMBER: u8 = 14;

impl DashboardClient {
    /// `GET /networks/{networkId}/wireless/ssids`
    pub async fn list_ssids(&self, network_id: &str) -> Result<Vec<Record>, Error> {
        debug!(network_id, "listing SSIDs");
        self.get(&format!("networks/{network_id}/wireless/ssids"))
            .await
    }

    /// Configure an SSID slot.
    ///
    /// `PUT /networks/{networkId}/wireless/ssids/{number}`
    pub async fn update_ssid(
        &self,
        network_id: &str,
        number: u8,
        update: &SsidUpdate,
    ) -> Result<Record, Error> {
        debug!(network_id, number, "updating SSID");
        self.put(
            &format!("networks/{network_id}/wireless/ssids/{number}"),
            update,
        )
        .await
    }
}
