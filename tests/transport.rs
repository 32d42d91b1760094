//! Generic verb tests.
//!
//! Uses wiremock to stand in for the resource manager and checks the headers
//! and status handling of each verb.

use armclient::{ArmClient, ArmError, CloudConfig, ResourcePath};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ArmClient {
    let config = CloudConfig::default().with_management_endpoint(&server.uri());
    ArmClient::new(config, "test-token").unwrap()
}

fn group_url(client: &ArmClient) -> url::Url {
    let path = ResourcePath::subscription("sub")
        .unwrap()
        .resource_group("rg")
        .unwrap();
    client.url(&path, "2017-05-10").unwrap()
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/sub/resourceGroups/rg"))
        .and(query_param("api-version", "2017-05-10"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "rg"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.get_json(group_url(&client)).await.unwrap();
    assert_eq!(body["name"], "rg");

    let requests = mock_server.received_requests().await.unwrap();
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(user_agent.starts_with("armclient/"), "user agent: {user_agent}");
}

#[tokio::test]
async fn test_get_returns_error_body_without_failing() {
    let mock_server = MockServer::start().await;

    let error = serde_json::json!({
        "error": {"code": "ResourceGroupNotFound", "message": "Resource group 'rg' could not be found."}
    });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&error))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client.get_json(group_url(&client)).await.unwrap();
    assert_eq!(body, error);
}

#[tokio::test]
async fn test_get_non_json_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get_json(group_url(&client)).await;
    assert!(matches!(result, Err(ArmError::Parse(_))));
}

#[tokio::test]
async fn test_put_sends_json_and_returns_raw_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/subscriptions/sub/resourceGroups/rg"))
        .and(header("content-type", "application/json"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({"location": "westus"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"name": "rg"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .put(group_url(&client), &serde_json::json!({"location": "westus"}))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn test_patch_sends_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"tags": {"env": "prod"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .patch(group_url(&client), &serde_json::json!({"tags": {"env": "prod"}}))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_mutating_verbs_do_not_turn_status_into_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error": {"code": "Conflict", "message": "busy"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let response = client.delete(group_url(&client)).await.unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "Conflict");

    let response = client.post_empty(group_url(&client)).await.unwrap();
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = CloudConfig::default().with_management_endpoint(&format!("http://{addr}"));
    let client = ArmClient::new(config, "test-token").unwrap();

    let result = client.get_json(group_url(&client)).await;
    assert!(matches!(result, Err(ArmError::Http(_))));
}
