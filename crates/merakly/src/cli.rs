//! Clap derive structures for the `merakly` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};
use merakly_core::MAX_SSID_NUMBER;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// merakly -- chat with and manage your Cisco Meraki networks
#[derive(Debug, Parser)]
#[command(
    name = "merakly",
    version,
    about = "Chat with and manage Cisco Meraki networks from the terminal",
    long_about = "A conversational front-end for the Meraki Dashboard API.\n\n\
        Questions about the selected network are answered from live Dashboard\n\
        data; everything else goes to a local Ollama model.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "MERAKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Organization id or name (overrides profile)
    #[arg(long, env = "MERAKLY_ORG", global = true)]
    pub org: Option<String>,

    /// Network id or name (overrides profile)
    #[arg(long, short = 'n', env = "MERAKLY_NETWORK", global = true)]
    pub network: Option<String>,

    /// Dashboard API key (overrides env, keyring, and profile)
    #[arg(long, global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MERAKLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Dashboard request timeout in seconds (overrides profile)
    #[arg(long, env = "MERAKLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List organizations
    #[command(alias = "org")]
    Orgs(OrgsArgs),

    /// Manage networks
    #[command(alias = "net")]
    Networks(NetworksArgs),

    /// Manage wireless SSIDs
    #[command(alias = "wifi")]
    Ssids(SsidsArgs),

    /// Manage appliance VLANs
    Vlans(VlansArgs),

    /// Device operations
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Manage switch ports
    SwitchPorts(SwitchPortsArgs),

    /// Manage appliance firewall rules
    #[command(alias = "fw")]
    Firewall(FirewallArgs),

    /// Ask one question and print the answer
    Ask(AskArgs),

    /// Start an interactive chat session
    Chat,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Organizations ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrgsArgs {
    #[command(subcommand)]
    pub command: OrgsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrgsCommand {
    /// List organizations visible to the API key
    #[command(alias = "ls")]
    List,
}

// ── Networks ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// List networks of the selected organization
    #[command(alias = "ls")]
    List,

    /// Create a network in the selected organization
    Create {
        /// Network name
        #[arg(long)]
        name: String,

        /// Product types (repeatable or comma-separated)
        #[arg(long = "product-type", value_delimiter = ',', default_value = "wireless")]
        product_types: Vec<ProductType>,

        /// Tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// IANA time zone, e.g. "Europe/London"
        #[arg(long)]
        time_zone: Option<String>,
    },

    /// Update the selected network
    Update {
        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Replace tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProductType {
    Wireless,
    Appliance,
    Switch,
    Camera,
}

impl ProductType {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Wireless => "wireless",
            Self::Appliance => "appliance",
            Self::Switch => "switch",
            Self::Camera => "camera",
        }
    }
}

// ── SSIDs ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SsidsArgs {
    #[command(subcommand)]
    pub command: SsidsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SsidsCommand {
    /// List SSID slots of the selected network
    #[command(alias = "ls")]
    List,

    /// Configure an SSID slot
    Create {
        /// Slot number (0-14)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_SSID_NUMBER)))]
        number: u8,

        /// Broadcast name
        #[arg(long)]
        name: String,

        /// Leave the SSID disabled
        #[arg(long)]
        disabled: bool,

        /// Authentication mode
        #[arg(long, default_value = "open")]
        auth_mode: AuthMode,

        /// Pre-shared key (required for psk)
        #[arg(long)]
        psk: Option<String>,
    },

    /// Change an SSID slot
    Update {
        /// Slot number (0-14)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_SSID_NUMBER)))]
        number: u8,

        /// New broadcast name
        #[arg(long)]
        name: Option<String>,

        /// Enable or disable the SSID
        #[arg(long)]
        enabled: Option<bool>,

        /// Authentication mode
        #[arg(long)]
        auth_mode: Option<AuthMode>,

        /// Pre-shared key
        #[arg(long)]
        psk: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthMode {
    Open,
    Psk,
    #[value(name = "8021x-radius")]
    Radius,
}

impl AuthMode {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Psk => "psk",
            Self::Radius => "8021x-radius",
        }
    }
}

// ── VLANs ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List VLANs of the selected network
    #[command(alias = "ls")]
    List,

    /// Create a VLAN
    Create {
        /// VLAN id (1-4094)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=4094))]
        id: u16,

        #[arg(long)]
        name: String,

        /// Subnet in CIDR form, e.g. 192.168.10.0/24
        #[arg(long)]
        subnet: String,

        /// Appliance address on the subnet
        #[arg(long)]
        appliance_ip: String,
    },

    /// Update a VLAN
    Update {
        /// VLAN id
        #[arg(long)]
        id: u16,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        subnet: Option<String>,

        #[arg(long)]
        appliance_ip: Option<String>,
    },
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// Reboot a device
    Reboot {
        /// Device serial
        serial: String,
    },

    /// Claim devices into the selected network
    Claim {
        /// Device serials
        #[arg(required = true, num_args = 1..)]
        serials: Vec<String>,
    },
}

// ── Switch ports ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SwitchPortsArgs {
    #[command(subcommand)]
    pub command: SwitchPortsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SwitchPortsCommand {
    /// List ports of a switch
    #[command(alias = "ls")]
    List {
        /// Switch serial
        serial: String,
    },

    /// Update a switch port
    Update {
        /// Switch serial
        serial: String,

        /// Port id
        port: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        enabled: Option<bool>,

        #[arg(long)]
        poe_enabled: Option<bool>,

        /// Access VLAN (or native VLAN for trunks)
        #[arg(long)]
        vlan: Option<u16>,

        #[arg(long = "type")]
        port_type: Option<PortType>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PortType {
    Access,
    Trunk,
}

impl PortType {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Trunk => "trunk",
        }
    }
}

// ── Firewall ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FirewallArgs {
    #[command(subcommand)]
    pub command: FirewallCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallCommand {
    /// Layer-3 rules of the selected network's appliance
    Rules(FirewallRulesArgs),
}

#[derive(Debug, Args)]
pub struct FirewallRulesArgs {
    #[command(subcommand)]
    pub command: FirewallRulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FirewallRulesCommand {
    /// List rules in evaluation order
    #[command(alias = "ls")]
    List,

    /// Append a rule (evaluated before the default rule)
    Add {
        #[arg(long)]
        policy: Policy,

        #[arg(long)]
        protocol: Protocol,

        /// Source CIDR(s), comma-separated, or "Any"
        #[arg(long, default_value = "Any")]
        src_cidr: String,

        /// Source port(s) or range; tcp/udp only
        #[arg(long)]
        src_port: Option<String>,

        /// Destination CIDR(s), comma-separated, or "Any"
        #[arg(long)]
        dest_cidr: String,

        /// Destination port(s) or range; tcp/udp only
        #[arg(long)]
        dest_port: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Change a rule by its number in `firewall rules list`
    Update {
        /// Rule number (1-based)
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        rule: u16,

        #[arg(long)]
        policy: Option<Policy>,

        #[arg(long)]
        protocol: Option<Protocol>,

        #[arg(long)]
        src_cidr: Option<String>,

        #[arg(long)]
        src_port: Option<String>,

        #[arg(long)]
        dest_cidr: Option<String>,

        #[arg(long)]
        dest_port: Option<String>,

        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Policy {
    Allow,
    Deny,
}

impl Policy {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Icmp6,
    Any,
}

impl Protocol {
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Icmp => "icmp",
            Self::Icmp6 => "icmp6",
            Self::Any => "any",
        }
    }

    /// Whether port fields mean anything for this protocol.
    pub fn has_ports(self) -> bool {
        matches!(self, Self::Tcp | Self::Udp)
    }
}

// ── Chat ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// Set a profile value
    Set {
        /// Key, e.g. network, llm_model, timeout
        key: String,
        value: String,
    },

    /// Store the API key in the system keyring
    SetKey {
        /// Profile (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
