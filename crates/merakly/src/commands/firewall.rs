//! Appliance L3 firewall rule handlers.
//!
//! The Dashboard only takes the whole rule list, so `add` and `update`
//! read the current rules, edit them locally, and write them back.

use serde::Serialize;
use tabled::Tabled;

use merakly_core::{CoreError, FirewallRule, FirewallRuleUpdate};

use crate::cli::{FirewallArgs, FirewallCommand, FirewallRulesCommand, GlobalOpts, Protocol};
use crate::config::Selection;
use crate::error::CliError;
use crate::output;

use super::util::{self, Dashboard};

const ANY: &str = "Any";

/// A rule with its 1-based position, the handle `update --rule` takes.
#[derive(Serialize)]
struct NumberedRule {
    number: usize,
    #[serde(flatten)]
    rule: FirewallRule,
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Comment")]
    comment: String,
}

impl From<&NumberedRule> for RuleRow {
    fn from(n: &NumberedRule) -> Self {
        let r = &n.rule;
        Self {
            number: if r.is_default() {
                "-".into()
            } else {
                n.number.to_string()
            },
            policy: r.policy.clone(),
            protocol: r.protocol.clone(),
            source: endpoint(&r.src_cidr, r.src_port.as_deref()),
            destination: endpoint(&r.dest_cidr, r.dest_port.as_deref()),
            comment: r.comment.clone().unwrap_or_default(),
        }
    }
}

fn endpoint(cidr: &str, port: Option<&str>) -> String {
    match port {
        Some(port) if !port.eq_ignore_ascii_case(ANY) => format!("{cidr}:{port}"),
        _ => cidr.to_owned(),
    }
}

fn numbered(rules: Vec<FirewallRule>) -> Vec<NumberedRule> {
    rules
        .into_iter()
        .enumerate()
        .map(|(i, rule)| NumberedRule {
            number: i + 1,
            rule,
        })
        .collect()
}

/// Ports only apply to tcp/udp; for other protocols they must be left unset.
fn ports_for(
    protocol: Protocol,
    src_port: Option<String>,
    dest_port: Option<String>,
) -> Result<(Option<String>, Option<String>), CliError> {
    if protocol.has_ports() {
        return Ok((
            Some(src_port.unwrap_or_else(|| ANY.into())),
            Some(dest_port.unwrap_or_else(|| ANY.into())),
        ));
    }
    let explicit = [src_port.as_deref(), dest_port.as_deref()]
        .into_iter()
        .flatten()
        .any(|p| !p.eq_ignore_ascii_case(ANY));
    if explicit {
        return Err(CliError::Validation {
            field: "port".into(),
            reason: format!("{} rules take no ports", protocol.as_api_str()),
        });
    }
    Ok((None, None))
}

/// Append `rule` after the last editable rule.
fn append_rule(mut rules: Vec<FirewallRule>, rule: FirewallRule) -> Vec<FirewallRule> {
    rules.retain(|r| !r.is_default());
    rules.push(rule);
    rules
}

/// Apply `update` to rule `number` (1-based). The default rule is not editable.
fn update_rule(
    rules: &mut [FirewallRule],
    number: usize,
    update: FirewallRuleUpdate,
) -> Result<(), CliError> {
    let rule = number
        .checked_sub(1)
        .and_then(|i| rules.get_mut(i))
        .filter(|r| !r.is_default())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "firewall rule".into(),
            identifier: number.to_string(),
            list_command: "firewall rules list".into(),
        })?;
    rule.apply(update);
    Ok(())
}

fn print_rules(rules: Vec<FirewallRule>, global: &GlobalOpts) {
    let rules = numbered(rules);
    let out = output::render_list(
        &global.output,
        &rules,
        |r| RuleRow::from(r),
        |r| r.number.to_string(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    assistant: &Dashboard,
    args: FirewallArgs,
    selection: &Selection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let FirewallCommand::Rules(args) = args.command;
    let network_id = util::require_network(assistant, selection).await?;
    let gateway = assistant.gateway();

    match args.command {
        FirewallRulesCommand::List => {
            let rules = gateway
                .list_l3_firewall_rules(&network_id)
                .await
                .map_err(CoreError::from)?;
            print_rules(rules, global);
            Ok(())
        }

        FirewallRulesCommand::Add {
            policy,
            protocol,
            src_cidr,
            src_port,
            dest_cidr,
            dest_port,
            comment,
        } => {
            let (src_port, dest_port) = ports_for(protocol, src_port, dest_port)?;
            let rule = FirewallRule {
                comment,
                policy: policy.as_api_str().into(),
                protocol: protocol.as_api_str().into(),
                src_port,
                src_cidr,
                dest_port,
                dest_cidr,
                syslog_enabled: None,
            };

            let current = gateway
                .list_l3_firewall_rules(&network_id)
                .await
                .map_err(CoreError::from)?;
            let rules = append_rule(current, rule);
            let position = rules.len();
            let updated = gateway
                .replace_l3_firewall_rules(&network_id, &rules)
                .await
                .map_err(CoreError::from)?;

            if !global.quiet {
                eprintln!("Added firewall rule #{position}");
            }
            print_rules(updated, global);
            Ok(())
        }

        FirewallRulesCommand::Update {
            rule,
            policy,
            protocol,
            src_cidr,
            src_port,
            dest_cidr,
            dest_port,
            comment,
        } => {
            let update = FirewallRuleUpdate {
                comment,
                policy: policy.map(|p| p.as_api_str().to_owned()),
                protocol: protocol.map(|p| p.as_api_str().to_owned()),
                src_port,
                src_cidr,
                dest_port,
                dest_cidr,
            };
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one rule field".into(),
                });
            }

            let mut rules = gateway
                .list_l3_firewall_rules(&network_id)
                .await
                .map_err(CoreError::from)?;
            update_rule(&mut rules, usize::from(rule), update)?;
            let updated = gateway
                .replace_l3_firewall_rules(&network_id, &rules)
                .await
                .map_err(CoreError::from)?;

            if !global.quiet {
                eprintln!("Updated firewall rule #{rule}");
            }
            print_rules(updated, global);
            Ok(())
        }
    }
}
