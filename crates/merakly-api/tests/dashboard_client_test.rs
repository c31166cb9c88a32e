#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardClient` and `OllamaClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use merakly_api::{
    DashboardClient, Error, FirewallRule, GenerateOptions, NewNetwork, OllamaClient, SsidUpdate,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let key: secrecy::SecretString = "test-key".to_string().into();
    let client =
        DashboardClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_header_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "123", "name": "Acme"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();
    assert_eq!(orgs.len(), 1);
    assert_eq!(orgs[0]["name"], "Acme");
}

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"errors": ["Invalid API key"]})))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_error_envelope_messages_are_joined() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/appliance/vlans"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"errors": ["VLANs are not enabled for this network", "try again"]}),
        ))
        .mount(&server)
        .await;

    let err = client.list_vlans("N_1").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "VLANs are not enabled for this network; try again");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/clients"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client.list_clients("N_1").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 7 }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/missing/devices"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.list_devices("missing").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got {err:?}");
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_records_keep_field_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"serial":"Q2XX-1","name":"core","model":"MS120-8","lat":37.1,"lng":-122.4}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let devices = client.list_devices("N_1").await.unwrap();
    let keys: Vec<&str> = devices[0].keys().map(String::as_str).collect();
    assert_eq!(keys, ["serial", "name", "model", "lat", "lng"]);
}

#[tokio::test]
async fn test_network_events_use_product_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/events"))
        .and(query_param("productType", "appliance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": null,
            "events": [{"type": "ids_alerted", "description": "IDS alert"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.list_network_events("N_1", "appliance").await.unwrap();
    assert_eq!(page["events"][0]["type"], "ids_alerted");
}

#[tokio::test]
async fn test_vpn_statuses_are_org_scoped() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/vpn/statuses"))
        .and(query_param("networkIds[]", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "networkId": "N_1",
            "deviceStatus": "online",
            "merakiVpnPeers": [],
            "thirdPartyVpnPeers": [{"name": "AWS", "publicIp": "203.0.113.9", "reachability": "reachable"}]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let statuses = client.list_vpn_statuses("123", "N_1").await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0]["thirdPartyVpnPeers"][0]["publicIp"], "203.0.113.9");
}

#[tokio::test]
async fn test_vpn_statuses_empty_body_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/vpn/statuses"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client.list_vpn_statuses("123", "N_1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_uplink_statuses_are_org_scoped() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/uplink/statuses"))
        .and(query_param("networkIds[]", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "networkId": "N_1",
            "serial": "Q2-MX",
            "uplinks": [{"interface": "wan1", "status": "active"}]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let uplinks = client.list_uplink_statuses("123", "N_1").await.unwrap();
    assert_eq!(uplinks[0]["serial"], "Q2-MX");
}

#[tokio::test]
async fn test_get_network_exposes_organization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "N_1", "organizationId": "123", "name": "HQ"
        })))
        .mount(&server)
        .await;

    let network = client.get_network("N_1").await.unwrap();
    assert_eq!(network["organizationId"], "123");
}

// ── Firewall ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_l3_rules_listing_keeps_default_rule() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_1/appliance/firewall/l3FirewallRules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rules": [
            {"comment": "telnet", "policy": "deny", "protocol": "tcp", "srcPort": "Any",
             "srcCidr": "Any", "destPort": "23", "destCidr": "Any", "syslogEnabled": false},
            {"comment": "Default rule", "policy": "allow", "protocol": "Any", "srcPort": "Any",
             "srcCidr": "Any", "destPort": "Any", "destCidr": "Any", "syslogEnabled": false}
        ]})))
        .mount(&server)
        .await;

    let rules = client.list_l3_firewall_rules("N_1").await.unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].dest_port.as_deref(), Some("23"));
    assert!(rules[1].is_default());
}

#[tokio::test]
async fn test_l3_rules_replace_drops_default_rule() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_1/appliance/firewall/l3FirewallRules"))
        .and(body_json(json!({"rules": [
            {"policy": "deny", "protocol": "udp", "srcPort": "Any", "srcCidr": "Any",
             "destPort": "53", "destCidr": "8.8.8.8/32"}
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rules": [
            {"policy": "deny", "protocol": "udp", "srcPort": "Any", "srcCidr": "Any",
             "destPort": "53", "destCidr": "8.8.8.8/32"},
            {"comment": "Default rule", "policy": "allow", "protocol": "Any",
             "srcCidr": "Any", "destCidr": "Any"}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let rule = FirewallRule {
        comment: None,
        policy: "deny".into(),
        protocol: "udp".into(),
        src_port: Some("Any".into()),
        src_cidr: "Any".into(),
        dest_port: Some("53".into()),
        dest_cidr: "8.8.8.8/32".into(),
        syslog_enabled: None,
    };
    let default_rule = FirewallRule {
        comment: Some("Default rule".into()),
        policy: "allow".into(),
        protocol: "Any".into(),
        src_port: None,
        src_cidr: "Any".into(),
        dest_port: None,
        dest_cidr: "Any".into(),
        syslog_enabled: None,
    };

    let rules = client
        .replace_l3_firewall_rules("N_1", &[rule, default_rule])
        .await
        .unwrap();
    assert_eq!(rules.len(), 2);
}

// ── Devices ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_claim_devices_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/networks/N_1/devices/claim"))
        .and(body_json(json!({"serials": ["Q2AA-BBBB-CCCC", "Q2DD-EEEE-FFFF"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let serials = vec!["Q2AA-BBBB-CCCC".to_owned(), "Q2DD-EEEE-FFFF".to_owned()];
    let answer = client.claim_devices("N_1", &serials).await.unwrap();
    assert!(answer.is_null());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_network_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/organizations/123/networks"))
        .and(body_json(json!({"name": "Branch", "productTypes": ["wireless", "switch"]})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "N_9", "name": "Branch"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let net = client
        .create_network(
            "123",
            &NewNetwork {
                name: "Branch".into(),
                product_types: vec!["wireless".into(), "switch".into()],
                tags: Vec::new(),
                time_zone: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(net["id"], "N_9");
}

#[tokio::test]
async fn test_update_ssid_uses_slot_path() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/networks/N_1/wireless/ssids/3"))
        .and(body_json(json!({"name": "Guest", "enabled": true, "authMode": "open"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"number": 3, "name": "Guest"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = SsidUpdate {
        name: Some("Guest".into()),
        enabled: Some(true),
        auth_mode: Some("open".into()),
        ..SsidUpdate::default()
    };
    let ssid = client.update_ssid("N_1", 3, &update).await.unwrap();
    assert_eq!(ssid["number"], 3);
}

// ── Ollama ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_ollama_generate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "model": "mistral",
            "prompt": "hello",
            "stream": false,
            "options": {"temperature": 0.5}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "hi there", "done": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new(
        &server.uri(),
        "mistral",
        GenerateOptions { temperature: 0.5 },
        &TransportConfig::default(),
    )
    .unwrap();

    assert_eq!(client.generate("hello").await.unwrap(), "hi there");
}

#[tokio::test]
async fn test_ollama_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "model 'mistral' not found"})),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new(
        &server.uri(),
        "mistral",
        GenerateOptions::default(),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.generate("hello").await.unwrap_err();
    match err {
        Error::Completion { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "model 'mistral' not found");
        }
        other => panic!("expected Completion error, got {other:?}"),
    }
}
