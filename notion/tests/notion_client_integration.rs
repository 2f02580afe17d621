use notion::{CreatePageRequest, DatabaseClient, NotionClient, NotionConfig, NotionError, PropertyValue};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_client(server: &MockServer) -> NotionClient {
    NotionClient::new(
        NotionConfig::new("secret_test")
            .with_base_url(server.uri())
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("client creation")
}

#[tokio::test]
async fn test_create_page_sends_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .and(header("authorization", "Bearer secret_test"))
        .and(header("notion-version", "2022-06-28"))
        .and(body_partial_json(json!({
            "parent": {"database_id": "db-1"},
            "properties": {"Statut": {"select": {"name": "Done"}}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "page",
            "id": "page-42",
            "url": "https://www.notion.so/page-42",
            "created_time": "2026-10-17T09:30:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server);
    let request =
        CreatePageRequest::new("db-1").with_property("Statut", PropertyValue::select("Done"));

    let page = client.create_page(request).await.expect("create_page failed");
    assert_eq!(page.id, "page-42");
    assert_eq!(page.url.as_deref(), Some("https://www.notion.so/page-42"));
}

#[tokio::test]
async fn test_create_page_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error",
            "status": 401,
            "code": "unauthorized",
            "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let client = make_client(&server);
    let result = client.create_page(CreatePageRequest::new("db-1")).await;

    match result {
        Err(NotionError::Authentication { message }) => {
            assert_eq!(message, "API token is invalid.")
        }
        other => panic!("expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retrieve_database() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/db-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "database",
            "id": "db-1",
            "title": [{"type": "text", "plain_text": "Oracle Portfolio Tracking"}],
            "properties": {
                "Oracle Portfolio Tracking": {"id": "title", "type": "title"},
                "Statut": {"id": "s1", "type": "select"},
                "Progression": {"id": "p1", "type": "number"}
            }
        })))
        .mount(&server)
        .await;

    let client = make_client(&server);
    let database = client.retrieve_database("db-1").await.unwrap();

    assert_eq!(database.title_text(), "Oracle Portfolio Tracking");
    assert_eq!(database.columns().len(), 3);
    client.health_check("db-1").await.unwrap();
}

#[tokio::test]
async fn test_retrieve_missing_database() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find database with ID: unknown."
        })))
        .mount(&server)
        .await;

    let client = make_client(&server);
    let result = client.retrieve_database("unknown").await;
    assert!(matches!(result, Err(NotionError::NotFound { .. })));
}

#[tokio::test]
async fn test_unreachable_api_is_service_unavailable() {
    let client = NotionClient::new(
        NotionConfig::new("secret_test")
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let result = client.create_page(CreatePageRequest::new("db-1")).await;
    assert!(matches!(
        result,
        Err(NotionError::ServiceUnavailable { .. }) | Err(NotionError::Network(_))
    ));
}
