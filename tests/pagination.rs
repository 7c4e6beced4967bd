//! Pagination and filtering tests.

use linodeapi::{list_all, Filter, LinodeClient, List, ListOptions, Region};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn region(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "label": id,
        "country": "us",
        "capabilities": ["Linodes", "Block Storage"],
        "status": "ok",
        "resolvers": {"ipv4": "192.0.2.0,192.0.2.1", "ipv6": "2001:0db8::,2001:0db8::1"}
    })
}

fn page(ids: &[&str], page: u32, pages: u32, results: u64) -> serde_json::Value {
    json!({
        "data": ids.iter().map(|id| region(id)).collect::<Vec<_>>(),
        "page": page,
        "pages": pages,
        "results": results
    })
}

#[tokio::test]
async fn test_list_all_follows_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["us-east", "us-west"], 1, 3, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["eu-west", "eu-central"], 2, 3, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["ap-south"], 3, 3, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let regions = Region::list_all(&client, &(), None).await.unwrap();

    let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["us-east", "us-west", "eu-west", "eu-central", "ap-south"]);
}

#[tokio::test]
async fn test_pinned_page_fetches_only_that_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["eu-west"], 2, 3, 51)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let opts = ListOptions::for_page(2).with_page_size(25);
    let regions = Region::list_all(&client, &(), Some(&opts)).await.unwrap();

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].id, "eu-west");
}

#[tokio::test]
async fn test_list_page_reports_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["us-east"], 1, 4, 4)))
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let page = Region::list_page(&client, &(), &ListOptions::for_page(1))
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.pages, 4);
    assert_eq!(page.results, 4);
    assert!(page.has_more());
}

#[tokio::test]
async fn test_filter_travels_in_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .and(header("X-Filter", r#"{"+and":[{"country":"us"}]}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["us-east"], 1, 1, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let opts = ListOptions::default().with_filter(&Filter::eq("country", "us"));
    let regions = Region::list_all(&client, &(), Some(&opts)).await.unwrap();

    assert_eq!(regions.len(), 1);
}

#[tokio::test]
async fn test_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lke/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "page": 1,
            "pages": 1,
            "results": 0
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let versions: Vec<linodeapi::LkeVersion> = list_all(&client, "lke/versions", None).await.unwrap();

    assert!(versions.is_empty());
}

#[tokio::test]
async fn test_list_all_stops_at_page_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["us-east"], 1, 5000, 5000)))
        .expect(1000)
        .mount(&mock_server)
        .await;

    let client = LinodeClient::new("test-token", &mock_server.uri()).unwrap();
    let regions = Region::list_all(&client, &(), None).await.unwrap();

    assert_eq!(regions.len(), 1000);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1000);
    assert!(requests
        .iter()
        .all(|r| r.url.query_pairs().all(|(k, v)| k != "page" || v != "1001")));
}
