// Dashboard organization endpoints
//
// Organization listing is key-scoped; network listing and creation are
// scoped to one organization.

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{NewNetwork, Record};
use crate::error::Error;

impl DashboardClient {
    /// List every organization the API key can see.
    ///
    /// `GET /organizations`
    pub async fn list_organizations(&self) -> Result<Vec<Record>, Error> {
        debug!("listing organizations");
        self.get("organizations").await
    }

    /// List the networks of one organization.
    ///
    /// `GET /organizations/{organizationId}/networks`
    pub async fn list_networks(&self, org_id: &str) -> Result<Vec<Record>, Error> {
        debug!(org_id, "listing networks");
        self.get(&format!("organizations/{org_id}/networks")).await
    }

    /// Create a network inside an organization.
    ///
    /// `POST /organizations/{organizationId}/networks`
    pub async fn create_network(&self, org_id: &str, network: &NewNetwork) -> Result<Record, Error> {
        debug!(org_id, name = %network.name, "creating network");
        self.post(&format!("organizations/{org_id}/networks"), network)
            .await
    }
}
