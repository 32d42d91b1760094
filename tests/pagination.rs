//! nextLink pagination tests.
//!
//! Uses wiremock to serve chains of list pages.

use armclient::{ArmClient, ArmError, CloudConfig, List, ResourceGroup};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ArmClient {
    let config = CloudConfig::default().with_management_endpoint(&server.uri());
    ArmClient::new(config, "test-token").unwrap()
}

fn page_url(server: &MockServer, page: &str) -> url::Url {
    url::Url::parse(&format!("{}/{page}", server.uri())).unwrap()
}

#[tokio::test]
async fn test_two_pages_are_concatenated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [1, 2],
            "nextLink": format!("{}/page2", mock_server.uri())
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [3]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.get_paged(page_url(&mock_server, "page1")).await.unwrap();
    assert_eq!(body, json!({"value": [1, 2, 3]}));
}

#[tokio::test]
async fn test_relative_next_link_resolves_against_current_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list/page1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"value": ["a"], "nextLink": "page2"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": ["b"]})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client
        .get_paged(page_url(&mock_server, "list/page1"))
        .await
        .unwrap();
    assert_eq!(body, json!({"value": ["a", "b"]}));
}

#[tokio::test]
async fn test_first_page_without_value_is_returned_unmodified() {
    let mock_server = MockServer::start().await;

    let error = json!({"error": {"code": "InvalidAuthenticationToken", "message": "expired"}});
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&error))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.get_paged(page_url(&mock_server, "page1")).await.unwrap();
    assert_eq!(body, error);
}

#[tokio::test]
async fn test_failure_mid_chain_discards_partial_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [1],
            "nextLink": format!("{}/page2", mock_server.uri())
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream timeout"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get_paged(page_url(&mock_server, "page1")).await;
    assert!(matches!(result, Err(ArmError::Parse(_))));
}

#[tokio::test]
async fn test_typed_list_follows_next_link() {
    let mock_server = MockServer::start().await;

    let group = |name: &str| {
        json!({
            "id": format!("/subscriptions/sub/resourceGroups/{name}"),
            "name": name,
            "location": "westus"
        })
    };

    Mock::given(method("GET"))
        .and(path("/subscriptions/sub/resourceGroups"))
        .and(query_param("api-version", "2017-05-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [group("a"), group("b")],
            "nextLink": format!("{}/subscriptions/sub/resourceGroups?api-version=2017-05-10&$skiptoken=xyz", mock_server.uri())
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/sub/resourceGroups"))
        .and(query_param("$skiptoken", "xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [group("c")]})))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let groups = ResourceGroup::list(&client, &"sub".to_string()).await.unwrap();
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[tokio::test]
async fn test_typed_list_error_body_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "SubscriptionNotFound", "message": "The subscription 'sub' could not be found."}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = ResourceGroup::list(&client, &"sub".to_string()).await;
    match result {
        Err(ArmError::Api { code, .. }) => assert_eq!(code.as_deref(), Some("SubscriptionNotFound")),
        other => panic!("expected API error, got {other:?}"),
    }
}
