//! Firewall endpoint tests.

use linodeapi::{
    get_firewall_rules, update_firewall_rules, Create, DevicesCreationOptions, Firewall,
    FirewallCreateOptions, FirewallRule, FirewallRuleSet, FirewallStatus, FirewallUpdateOptions,
    Get, LinodeClient, NetworkAddresses, NetworkProtocol, Update,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIREWALL: &str = include_str!("fixtures/firewall.json");

#[tokio::test]
async fn test_get_firewall_with_ruleset_reference() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/networking/firewalls/123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIREWALL, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let firewall = Firewall::get(&client, 123).await.unwrap();

    assert_eq!(firewall.status, FirewallStatus::Enabled);
    assert_eq!(firewall.rules.inbound.len(), 2);
    assert_eq!(firewall.rules.inbound[0].protocol, NetworkProtocol::Tcp);
    assert_eq!(firewall.rules.inbound[1].ruleset, Some(7));
    assert_eq!(firewall.rules.inbound_policy, "DROP");
}

#[tokio::test]
async fn test_disable_firewall() {
    let mock_server = MockServer::start().await;

    let mut disabled: serde_json::Value = serde_json::from_str(FIREWALL).unwrap();
    disabled["status"] = json!("disabled");

    Mock::given(method("PUT"))
        .and(path("/networking/firewalls/123"))
        .and(body_json(json!({"status": "disabled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(disabled))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let params = FirewallUpdateOptions {
        status: Some(FirewallStatus::Disabled),
        ..Default::default()
    };
    let firewall = Firewall::update(&client, 123, params).await.unwrap();

    assert_eq!(firewall.status, FirewallStatus::Disabled);
}

#[tokio::test]
async fn test_create_firewall_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/networking/firewalls"))
        .and(body_json(json!({
            "label": "firewall123",
            "rules": {
                "inbound": [{
                    "action": "ACCEPT",
                    "label": "ssh",
                    "ports": "22",
                    "protocol": "TCP",
                    "addresses": {"ipv4": ["192.0.2.0/24"]}
                }],
                "inbound_policy": "DROP",
                "outbound": [],
                "outbound_policy": "ACCEPT"
            },
            "devices": {"linodes": [123]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FIREWALL, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let options = FirewallCreateOptions {
        label: Some("firewall123".to_string()),
        rules: FirewallRuleSet {
            inbound: vec![FirewallRule {
                action: "ACCEPT".to_string(),
                label: "ssh".to_string(),
                ports: Some("22".to_string()),
                protocol: NetworkProtocol::Tcp,
                addresses: NetworkAddresses {
                    ipv4: Some(vec!["192.0.2.0/24".to_string()]),
                    ipv6: None,
                },
                ..Default::default()
            }],
            inbound_policy: "DROP".to_string(),
            outbound: vec![],
            outbound_policy: "ACCEPT".to_string(),
        },
        devices: DevicesCreationOptions {
            linodes: vec![123],
            ..Default::default()
        },
        ..Default::default()
    };

    let firewall = Firewall::create(&client, &options).await.unwrap();
    assert_eq!(firewall.id, 123);
}

#[tokio::test]
async fn test_rules_round_trip_through_api() {
    let mock_server = MockServer::start().await;

    let rules = json!({
        "inbound": [{"ruleset": 7}],
        "inbound_policy": "DROP",
        "outbound": [],
        "outbound_policy": "ACCEPT"
    });

    Mock::given(method("GET"))
        .and(path("/networking/firewalls/123/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rules.clone()))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/networking/firewalls/123/rules"))
        .and(body_json(rules.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(rules))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let current = get_firewall_rules(&client, 123).await.unwrap();
    assert_eq!(current.inbound, vec![FirewallRule::ruleset(7)]);

    let updated = update_firewall_rules(&client, 123, &current).await.unwrap();
    assert_eq!(updated, current);
}
