//! Polling helper tests.

use std::time::Duration;

use linodeapi::{
    wait_for_event_finished, wait_for_instance_status, wait_for_lke_cluster_status,
    wait_for_volume_linode_id, InstanceStatus, LinodeClient, LinodeError, LkeClusterStatus,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE: &str = include_str!("fixtures/instance.json");
const VOLUME: &str = include_str!("fixtures/volume.json");
const EVENT: &str = include_str!("fixtures/event_started.json");
const CLUSTER: &str = include_str!("fixtures/lke_cluster.json");

fn with(fixture: &str, key: &str, value: Value) -> Value {
    let mut v: Value = serde_json::from_str(fixture).unwrap();
    v[key] = value;
    v
}

fn fast_client(mock_server: &MockServer) -> LinodeClient {
    LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_poll_interval(Duration::from_millis(5))
}

/// Serve `before` for the first `n` requests, then `after`.
async fn mount_transition(mock_server: &MockServer, route: &str, before: Value, n: u64, after: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(before))
        .up_to_n_times(n)
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_wait_for_instance_status() {
    let mock_server = MockServer::start().await;
    mount_transition(
        &mock_server,
        "/linode/instances/123",
        with(INSTANCE, "status", json!("booting")),
        2,
        with(INSTANCE, "status", json!("running")),
    )
    .await;

    let client = fast_client(&mock_server);
    let instance = wait_for_instance_status(&client, 123, InstanceStatus::Running, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(instance.is_running());
}

#[tokio::test]
async fn test_wait_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(with(INSTANCE, "status", json!("offline"))))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = wait_for_instance_status(&client, 123, InstanceStatus::Running, Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(matches!(err, LinodeError::Timeout { .. }));
    assert!(err.to_string().contains("instance 123 to be Running"));
}

#[tokio::test]
async fn test_api_error_ends_wait() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": [{"reason": "Not found"}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = wait_for_instance_status(&client, 123, InstanceStatus::Running, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_wait_for_volume_detach() {
    let mock_server = MockServer::start().await;
    mount_transition(
        &mock_server,
        "/volumes/12345",
        serde_json::from_str(VOLUME).unwrap(),
        1,
        with(VOLUME, "linode_id", Value::Null),
    )
    .await;

    let client = fast_client(&mock_server);
    let volume = wait_for_volume_linode_id(&client, 12345, None, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(!volume.is_attached());
}

#[tokio::test]
async fn test_wait_for_lke_cluster_ready() {
    let mock_server = MockServer::start().await;
    mount_transition(
        &mock_server,
        "/lke/clusters/12345",
        with(CLUSTER, "status", json!("not_ready")),
        1,
        serde_json::from_str(CLUSTER).unwrap(),
    )
    .await;

    let client = fast_client(&mock_server);
    let cluster = wait_for_lke_cluster_status(&client, 12345, LkeClusterStatus::Ready, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(cluster.status, LkeClusterStatus::Ready);
}

#[tokio::test]
async fn test_wait_for_event_finished() {
    let mock_server = MockServer::start().await;
    mount_transition(
        &mock_server,
        "/account/events/123",
        serde_json::from_str(EVENT).unwrap(),
        1,
        with(EVENT, "status", json!("finished")),
    )
    .await;

    let client = fast_client(&mock_server);
    let event = wait_for_event_finished(&client, 123, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(event.action, "linode_resize");
}

#[tokio::test]
async fn test_failed_event_is_an_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account/events/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(with(EVENT, "status", json!("failed"))))
        .mount(&mock_server)
        .await;

    let client = fast_client(&mock_server);
    let err = wait_for_event_finished(&client, 123, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, LinodeError::EventFailed { id: 123, ref action } if action == "linode_resize"));
}
