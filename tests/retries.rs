//! Retry policy tests.

use std::time::{Duration, Instant};

use linodeapi::{
    reboot_instance, Create, Get, Instance, LinodeClient, RetryConfig, Volume, VolumeCreateOptions,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE: &str = include_str!("fixtures/instance.json");
const VOLUME: &str = include_str!("fixtures/volume.json");

fn fast_retries() -> RetryConfig {
    RetryConfig::default().with_delays(Duration::from_millis(1), Duration::from_millis(20))
}

fn instance_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(INSTANCE, "application/json")
}

async fn mount_failures(mock_server: &MockServer, failure: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .respond_with(failure)
        .up_to_n_times(times)
        .expect(times)
        .mount(mock_server)
        .await;
}

async fn mount_success(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/linode/instances/123"))
        .respond_with(instance_ok())
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_too_many_requests_is_retried() {
    let mock_server = MockServer::start().await;
    mount_failures(&mock_server, ResponseTemplate::new(429), 2).await;
    mount_success(&mock_server).await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    let instance = Instance::get(&client, 123).await.unwrap();
    assert_eq!(instance.id, 123);
}

#[tokio::test]
async fn test_linode_busy_is_retried() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(400).set_body_json(json!({"errors": [{"reason": "Linode busy."}]})),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/linode/instances/123/reboot"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"errors": [{"reason": "Linode busy."}]})),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/linode/instances/123/reboot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_success(&mock_server).await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    Instance::get(&client, 123).await.unwrap();
    reboot_instance(&client, 123, None).await.unwrap();
}

#[tokio::test]
async fn test_nginx_html_400_is_retried() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(400)
            .insert_header("Server", "nginx")
            .set_body_raw("<html>400 Bad Request</html>", "text/html"),
        1,
    )
    .await;
    mount_success(&mock_server).await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    assert!(Instance::get(&client, 123).await.is_ok());
}

#[tokio::test]
async fn test_plain_400_is_not_retried() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(400)
            .set_body_json(json!({"errors": [{"field": "label", "reason": "Invalid"}]})),
        1,
    )
    .await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    let err = Instance::get(&client, 123).await.unwrap_err();
    assert_eq!(err.to_string(), "[400] [label] Invalid");
}

#[tokio::test]
async fn test_maintenance_mode_is_not_retried() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(503)
            .insert_header("X-Maintenance-Mode", "All requests are being rejected")
            .set_body_json(json!({"errors": [{"reason": "Maintenance in progress"}]})),
        1,
    )
    .await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    let err = Instance::get(&client, 123).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(503).set_body_json(json!({"errors": [{"reason": "Unavailable"}]})),
        3,
    )
    .await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries().with_max_retries(2));

    let err = Instance::get(&client, 123).await.unwrap_err();
    assert_eq!(err.to_string(), "[503] Unavailable");
}

#[tokio::test]
async fn test_retry_after_is_capped_by_max_delay() {
    let mock_server = MockServer::start().await;
    mount_failures(
        &mock_server,
        ResponseTemplate::new(429).insert_header("Retry-After", "60"),
        1,
    )
    .await;
    mount_success(&mock_server).await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());

    let start = Instant::now();
    Instance::get(&client, 123).await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_post_body_is_resent() {
    let mock_server = MockServer::start().await;
    let expected = json!({"label": "my-volume", "size": 30});

    Mock::given(method("POST"))
        .and(path("/volumes"))
        .and(body_json(expected.clone()))
        .respond_with(ResponseTemplate::new(408))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/volumes"))
        .and(body_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_raw(VOLUME, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_retry(fast_retries());
    let options = VolumeCreateOptions {
        label: "my-volume".to_string(),
        size: Some(30),
        ..Default::default()
    };

    let volume = Volume::create(&client, &options).await.unwrap();
    assert_eq!(volume.label, "my-volume");
}
