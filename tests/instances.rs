//! Instance endpoint tests.
//!
//! Uses wiremock to mock the Linode API and test the request/response flow.

use linodeapi::{
    boot_instance, list_instance_volumes, resize_instance, shutdown_instance, Create, Delete, Get,
    Instance, InstanceCreateOptions, InstanceResizeOptions, InstanceStatus, InstanceUpdateOptions,
    LinodeClient, Update,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE: &str = include_str!("fixtures/instance.json");
const VOLUME: &str = include_str!("fixtures/volume.json");

fn instance_json() -> serde_json::Value {
    serde_json::from_str(INSTANCE).unwrap()
}

#[tokio::test]
async fn test_get_instance_sends_token_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let instance = Instance::get(&client, 123).await.unwrap();

    assert_eq!(instance.label, "linode123");
    assert_eq!(instance.status, InstanceStatus::Running);
    assert_eq!(instance.instance_type.as_deref(), Some("g6-standard-1"));
    assert_eq!(instance.primary_ipv4(), Some("203.0.113.1"));
    assert_eq!(instance.specs.as_ref().unwrap().vcpus, 2);

    let backups = instance.backups.unwrap();
    assert!(backups.enabled);
    assert_eq!(backups.schedule.window.as_deref(), Some("W22"));
    assert!(backups.last_successful.is_some());
}

#[tokio::test]
async fn test_create_instance_posts_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/linode/instances"))
        .and(body_json(json!({
            "region": "us-east",
            "type": "g6-standard-1",
            "label": "linode123",
            "image": "linode/debian12",
            "root_pass": "aComplexP@ssword",
            "booted": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let options = InstanceCreateOptions {
        region: "us-east".to_string(),
        instance_type: "g6-standard-1".to_string(),
        label: Some("linode123".to_string()),
        image: Some("linode/debian12".to_string()),
        root_pass: Some("aComplexP@ssword".to_string()),
        booted: Some(true),
        ..Default::default()
    };

    let instance = Instance::create(&client, &options).await.unwrap();
    assert_eq!(instance.id, 123);
}

#[tokio::test]
async fn test_update_instance_puts_only_set_fields() {
    let mock_server = MockServer::start().await;

    let mut updated = instance_json();
    updated["label"] = json!("renamed");

    Mock::given(method("PUT"))
        .and(path("/linode/instances/123"))
        .and(body_json(json!({"label": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let params = InstanceUpdateOptions {
        label: Some("renamed".to_string()),
        ..Default::default()
    };

    let instance = Instance::update(&client, 123, params).await.unwrap();
    assert_eq!(instance.label, "renamed");
}

#[tokio::test]
async fn test_delete_instance() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/linode/instances/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    Instance::delete(&client, 123).await.unwrap();
}

#[tokio::test]
async fn test_power_actions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/linode/instances/123/boot"))
        .and(body_json(json!({"config_id": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/linode/instances/123/shutdown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    boot_instance(&client, 123, Some(5)).await.unwrap();
    shutdown_instance(&client, 123).await.unwrap();
}

#[tokio::test]
async fn test_resize_instance_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/linode/instances/123/resize"))
        .and(body_json(json!({"type": "g6-standard-2", "allow_auto_disk_resize": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let options = InstanceResizeOptions {
        instance_type: "g6-standard-2".to_string(),
        allow_auto_disk_resize: Some(false),
        ..Default::default()
    };
    resize_instance(&client, 123, &options).await.unwrap();
}

#[tokio::test]
async fn test_list_instance_volumes() {
    let mock_server = MockServer::start().await;

    let volume: serde_json::Value = serde_json::from_str(VOLUME).unwrap();
    Mock::given(method("GET"))
        .and(path("/linode/instances/123/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [volume],
            "page": 1,
            "pages": 1,
            "results": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let volumes = list_instance_volumes(&client, 123, None).await.unwrap();

    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0].linode_id, Some(123));
}

#[tokio::test]
async fn test_unknown_status_is_tolerated() {
    let mock_server = MockServer::start().await;

    let mut body = instance_json();
    body["status"] = json!("stasis");
    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let instance = Instance::get(&client, 123).await.unwrap();
    assert_eq!(instance.status, InstanceStatus::Unknown);
}
