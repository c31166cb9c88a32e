// The Dashboard-backed gateway against a mocked Dashboard.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use merakly_api::TransportConfig;
use merakly_core::{DashboardClient, RawResult, Session, ToolId, dispatch};

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let key = SecretString::from("test-key");
    let client =
        DashboardClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/networks/N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "N_1", "organizationId": "123", "name": "HQ"
        })))
        .mount(&server)
        .await;

    (server, client)
}

fn selected() -> Session {
    Session::with_selection(None, Some("N_1".into()))
}

#[tokio::test]
async fn vpn_status_reads_the_org_wide_listing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/vpn/statuses"))
        .and(query_param("networkIds[]", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "networkId": "N_1",
            "deviceStatus": "online",
            "merakiVpnPeers": [{"networkId": "N_2", "reachability": "reachable"}],
            "thirdPartyVpnPeers": [{"name": "AWS", "publicIp": "203.0.113.9", "reachability": "unreachable"}]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch(&client, ToolId::VpnStatus, &mut selected())
        .await
        .unwrap();
    let RawResult::Value(summary) = result else {
        panic!("expected a VPN summary, got {result:?}");
    };
    assert_eq!(summary["Device Status"], "online");
    assert_eq!(summary["Meraki VPN Peers"][0]["Peer Network ID"], "N_2");
    assert_eq!(summary["Non-Meraki VPN Peers"][0]["Public IP"], "203.0.113.9");
}

#[tokio::test]
async fn vpn_status_without_appliance_is_a_notice() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/vpn/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = dispatch(&client, ToolId::VpnStatus, &mut selected())
        .await
        .unwrap();
    let RawResult::Text(text) = result else {
        panic!("expected a notice, got {result:?}");
    };
    assert_eq!(text, "⚠️ No VPN status data available.");
}

#[tokio::test]
async fn uplinks_read_the_org_wide_listing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123/appliance/uplink/statuses"))
        .and(query_param("networkIds[]", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "networkId": "N_1", "serial": "Q2-MX", "model": "MX68"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatch(&client, ToolId::ListUplinks, &mut selected())
        .await
        .unwrap();
    let RawResult::Records(uplinks) = result else {
        panic!("expected uplink records, got {result:?}");
    };
    assert_eq!(uplinks[0]["serial"], "Q2-MX");
}
