//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate}; // For constructing mock bodies

// --- Test Constants ---
const TEST_TOKEN: &str = "ghp_test_token";
const RUNNERS_PATH: &str = "/repos/acme/widgets/actions/runners";

fn create_test_client() -> GitHubClient {
    GitHubClient::new(&SecretString::from(TEST_TOKEN.to_string())).expect("client")
}

fn runners_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), RUNNERS_PATH)).unwrap()
}

#[tokio::test]
async fn test_list_runners_page_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .and(header("authorization", "token ghp_test_token"))
        .and(header("accept", GITHUB_V3_MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "runners": [
                { "id": 1, "name": "r1", "os": "linux", "status": "offline", "busy": false, "labels": [] },
                { "id": 2, "name": "r2", "os": "linux", "status": "online", "busy": true, "labels": [] }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.list_runners_page(&runners_url(&mock_server)).await;

    if let Err(e) = &result {
        eprintln!("list_runners_page error: {e:?}");
    }
    let page = result.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.runners.len(), 2);
    assert_eq!(page.runners[0].status, RunnerStatus::Offline);
    assert!(page.next.is_none());
}

#[tokio::test]
async fn test_list_runners_page_reads_next_link() {
    let mock_server = MockServer::start().await;
    let next = format!("{}{}?per_page=1&page=2", mock_server.uri(), RUNNERS_PATH);

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!(r#"<{next}>; rel="next""#).as_str())
                .set_body_json(json!({
                    "total_count": 2,
                    "runners": [{ "id": 1, "name": "r1", "status": "offline" }]
                })),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let page = client
        .list_runners_page(&runners_url(&mock_server))
        .await
        .unwrap();

    assert_eq!(page.next.map(|u| u.to_string()), Some(next));
}

#[tokio::test]
async fn test_list_runners_page_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.list_runners_page(&runners_url(&mock_server)).await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_list_runners_page_api_error_carries_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Resource not accessible by integration"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.list_runners_page(&runners_url(&mock_server)).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(message, "Resource not accessible by integration");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_runners_page_api_error_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.list_runners_page(&runners_url(&mock_server)).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_runners_page_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.list_runners_page(&runners_url(&mock_server)).await;

    assert!(matches!(result, Err(Error::Deserialization(_))));
}

#[tokio::test]
async fn test_list_runners_page_keeps_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RUNNERS_PATH))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 0,
            "runners": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut url = runners_url(&mock_server);
    url.query_pairs_mut().append_pair("per_page", "50");

    let client = create_test_client();
    let page = client.list_runners_page(&url).await.unwrap();

    assert_eq!(page.total_count, 0);
    assert!(page.runners.is_empty());
}

#[tokio::test]
async fn test_delete_runner_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{RUNNERS_PATH}/42")))
        .and(header("authorization", "token ghp_test_token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.delete_runner(&runners_url(&mock_server), 42).await;

    if let Err(e) = &result {
        eprintln!("delete_runner error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_runner_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{RUNNERS_PATH}/42")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.delete_runner(&runners_url(&mock_server), 42).await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_delete_runner_unexpected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{RUNNERS_PATH}/42")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Bad request - Runner \"r42\" is still running a job\""
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client();
    let result = client.delete_runner(&runners_url(&mock_server), 42).await;

    assert!(matches!(
        result,
        Err(Error::UnexpectedStatus(StatusCode::UNPROCESSABLE_ENTITY))
    ));
}

#[test]
fn test_runner_url() {
    let base = Url::parse("https://api.github.com/orgs/acme/actions/runners").unwrap();

    assert_eq!(
        runner_url(&base, 17).unwrap().as_str(),
        "https://api.github.com/orgs/acme/actions/runners/17"
    );
}

#[test]
fn test_runner_url_with_trailing_slash() {
    let base = Url::parse("https://ghe.example.com/api/v3/enterprises/big/actions/runners/").unwrap();

    assert_eq!(
        runner_url(&base, 3).unwrap().as_str(),
        "https://ghe.example.com/api/v3/enterprises/big/actions/runners/3"
    );
}

#[test]
fn test_new_rejects_token_with_newline() {
    let token = SecretString::from("abc\ndef".to_string());

    let result = GitHubClient::new(&token);

    assert!(matches!(result, Err(Error::AuthError(_))));
}

#[test]
fn test_error_message_falls_back_to_reason() {
    assert_eq!(
        error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
        "Service Unavailable"
    );
    assert_eq!(
        error_message(StatusCode::FORBIDDEN, r#"{"message":"Bad credentials"}"#),
        "Bad credentials"
    );
}
