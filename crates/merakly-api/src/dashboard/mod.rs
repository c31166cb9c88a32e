// Dashboard API client modules
//
// Hand-written client for the Meraki Dashboard API v1. Endpoint groups
// (organizations, networks, wireless, appliance, devices) live in separate
// files as inherent methods on `DashboardClient`.

pub mod appliance;
pub mod client;
pub mod devices;
pub mod models;
pub mod networks;
pub mod organizations;
pub mod wireless;

pub use client::DashboardClient;
pub use models::{
    DeviceClaim, FirewallRule, FirewallRuleUpdate, L3FirewallRules, NetworkUpdate, NewNetwork,
    NewVlan, Record, SsidUpdate, SwitchPortUpdate, VlanUpdate,
};
