mod common;

use axum_test::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_save_without_alias_generates_one() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "OK");

    let alias = json["alias"].as_str().unwrap();
    assert_eq!(alias.len(), common::TEST_ALIAS_LENGTH);
    assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(repo.count_by_alias(alias).await.unwrap(), 1);
}

#[tokio::test]
async fn test_save_with_custom_alias() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com/docs", "alias": "docs" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "OK", "alias": "docs" }));

    let mapping = repo.find_by_alias("docs").await.unwrap();
    assert_eq!(mapping.url, "https://example.com/docs");
}

#[tokio::test]
async fn test_save_invalid_url() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "not-a-url", "alias": "bad" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field url is not a valid URL"
    }));
    assert_eq!(repo.count_by_alias("bad").await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_missing_url() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo)).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "alias": "nourl" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Error");
    assert_eq!(json["error"], "field url is a required field");
}

#[tokio::test]
async fn test_save_malformed_body() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo)).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "failed to decode request body"
    }));
}

#[tokio::test]
async fn test_save_duplicate_alias() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "dup" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "dup" }))
        .await;

    response.assert_status_internal_server_error();
    response.assert_json(&json!({ "status": "Error", "error": "failed to add url" }));
    assert_eq!(repo.count_by_alias("dup").await.unwrap(), 1);
}

#[tokio::test]
async fn test_save_requires_credentials() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "noauth" }))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(
        response.header("www-authenticate"),
        r#"Basic realm="url-shortener""#
    );
    assert_eq!(repo.count_by_alias("noauth").await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_rejects_wrong_password() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo)).unwrap();

    // admin:wrong
    let response = server
        .post("/url")
        .add_header("Authorization", "Basic YWRtaW46d3Jvbmc=")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
    response.assert_json(&json!({ "status": "Error", "error": "unauthorized" }));
}

#[tokio::test]
async fn test_save_rejects_alias_with_slash() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "a/b" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field alias is not valid"
    }));
    assert_eq!(repo.count_by_alias("a/b").await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_rejects_blank_alias() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo.clone())).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "  " }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field alias is not valid"
    }));
    assert_eq!(repo.count_by_alias("  ").await.unwrap(), 0);
}

#[tokio::test]
async fn test_save_rejects_overlong_alias() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo)).unwrap();

    let response = server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com", "alias": "a".repeat(65) }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_saved_alias_is_reachable() {
    let repo = common::create_test_repository().await;
    let server = TestServer::new(common::create_test_app(repo)).unwrap();

    server
        .post("/url")
        .add_header("Authorization", common::TEST_AUTH_HEADER)
        .json(&json!({ "url": "https://example.com/x", "alias": "my_link-1" }))
        .await
        .assert_status_ok();

    let response = server.get("/redirect/my_link-1").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/x");
}
