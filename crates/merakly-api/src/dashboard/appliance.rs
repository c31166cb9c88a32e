// Dashboard security-appliance (MX) endpoints

use tracing::debug;

use crate::dashboard::client::DashboardClient;
use crate::dashboard::models::{FirewallRule, L3FirewallRules, NewVlan, Record, VlanUpdate};
use crate::error::Error;

impl DashboardClient {
    /// `GET /networks/{networkId}/appliance/vlans`
    pub async fn list_vlans(&self, network_id: &str) -> Result<Vec<Record>, Error> {
        debug!(network_id, "listing VLANs");
        self.get(&format!("networks/{network_id}/appliance/vlans"))
            .await
    }

    /// `POST /networks/{networkId}/appliance/vlans`
    pub async fn create_vlan(&self, network_id: &str, vlan: &NewVlan) -> Result<Record, Error> {
        debug!(network_id, vlan_id = %vlan.id, "creating VLAN");
        self.post(&format!("networks/{network_id}/appliance/vlans"), vlan)
            .await
    }

    /// `PUT /networks/{networkId}/appliance/vlans/{vlanId}`
    pub async fn update_vlan(
        &self,
        network_id: &str,
        vlan_id: &str,
        update: &VlanUpdate,
    ) -> Result<Record, Error> {
        debug!(network_id, vlan_id, "updating VLAN");
        self.put(
            &format!("networks/{network_id}/appliance/vlans/{vlan_id}"),
            update,
        )
        .await
    }

    /// Uplink status of the network's appliances.
    ///
    /// `GET /organizations/{organizationId}/appliance/uplink/statuses?networkIds[]=...`
    pub async fn list_uplink_statuses(
        &self,
        org_id: &str,
        network_id: &str,
    ) -> Result<Vec<Record>, Error> {
        debug!(org_id, network_id, "listing uplink statuses");
        self.get_with_params(
            &format!("organizations/{org_id}/appliance/uplink/statuses"),
            &[("networkIds[]", network_id.to_owned())],
        )
        .await
    }

    /// Site-to-site VPN status, one entry per appliance network.
    ///
    /// `GET /organizations/{organizationId}/appliance/vpn/statuses?networkIds[]=...`
    pub async fn list_vpn_statuses(
        &self,
        org_id: &str,
        network_id: &str,
    ) -> Result<Vec<Record>, Error> {
        debug!(org_id, network_id, "listing VPN statuses");
        let statuses: Option<Vec<Record>> = self
            .get_with_params(
                &format!("organizations/{org_id}/appliance/vpn/statuses"),
                &[("networkIds[]", network_id.to_owned())],
            )
            .await?;
        Ok(statuses.unwrap_or_default())
    }

    // ── Layer-3 firewall ─────────────────────────────────────────────

    /// Current L3 rules, including the trailing default rule.
    ///
    /// `GET /networks/{networkId}/appliance/firewall/l3FirewallRules`
    pub async fn list_l3_firewall_rules(
        &self,
        network_id: &str,
    ) -> Result<Vec<FirewallRule>, Error> {
        debug!(network_id, "listing L3 firewall rules");
        let body: L3FirewallRules = self
            .get(&format!("networks/{network_id}/appliance/firewall/l3FirewallRules"))
            .await?;
        Ok(body.rules)
    }

    /// Replace the whole L3 rule list. The default rule is dropped before
    /// sending; the Dashboard re-appends it.
    ///
    /// `PUT /networks/{networkId}/appliance/firewall/l3FirewallRules`
    pub async fn replace_l3_firewall_rules(
        &self,
        network_id: &str,
        rules: &[FirewallRule],
    ) -> Result<Vec<FirewallRule>, Error> {
        let body = L3FirewallRules {
            rules: rules.iter().filter(|r| !r.is_default()).cloned().collect(),
        };
        debug!(network_id, count = body.rules.len(), "replacing L3 firewall rules");
        let updated: L3FirewallRules = self
            .put(
                &format!("networks/{network_id}/appliance/firewall/l3FirewallRules"),
                &body,
            )
            .await?;
        Ok(updated.rules)
    }
}
