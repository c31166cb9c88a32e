// merakly-api: Async Rust clients for the Meraki Dashboard API and Ollama

pub mod dashboard;
pub mod error;
pub mod ollama;
pub mod transport;

pub use dashboard::wireless::MAX_SSID_NUMBER;
pub use dashboard::{
    DashboardClient, DeviceClaim, FirewallRule, FirewallRuleUpdate, L3FirewallRules,
    NetworkUpdate, NewNetwork, NewVlan, Record, SsidUpdate, SwitchPortUpdate, VlanUpdate,
};
pub use error::Error;
pub use ollama::{GenerateOptions, OllamaClient};
pub use transport::TransportConfig;
