// Dashboard device-scoped endpoints (addressed by serial)

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{Record, SwitchPortUpdate};
use crate::error::Error;

impl DashboardClient {
    /// `POST /devices/{serial}/reboot`
    pub async fn reboot_device(&self, serial: &str) -> Result<Record, Error> {
        debug!(serial, "rebooting device");
        self.post(&format!("devices/{serial}/reboot"), &serde_json::json!({}))
            .await
    }

    /// `GET /devices/{serial}/switch/ports`
    pub async fn list_switch_ports(&self, serial: &str) -> Result<Vec<Record>, Error> {
        debug!(serial, "listing switch ports");
        self.get(&format!("devices/{serial}/switch/ports")).await
    }

    /// `PUT /devices/{serial}/switch/ports/{portId}`
    pub async fn update_switch_port(
        &self,
        serial: &str,
        port_id: &str,
        update: &SwitchPortUpdate,
    ) -> Result<Record, Error> {
        debug!(serial, port_id, "updating switch port");
        self.put(&format!("devices/{serial}/switch/ports/{port_id}"), update)
            .await
    }
}
