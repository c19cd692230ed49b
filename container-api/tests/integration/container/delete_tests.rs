// tests/integration/container/delete_tests.rs

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use crate::common::{
    app_helper,
    mock_runtime::{MockBehavior, MockRuntime},
};

#[tokio::test]
async fn test_delete_container_success() {
    let app = app_helper::setup_app(MockRuntime::succeeding("web_1"));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = app_helper::json_body(res).await;
    assert_eq!(body["message"], "Container 'web_1' successfully deleted");
    assert_eq!(body["output"], "web_1");
    assert!(body.get("error").is_none());

    assert_eq!(app.runtime.calls(), vec!["web_1".to_string()]);
}

#[tokio::test]
async fn test_delete_container_without_trailing_slash() {
    let app = app_helper::setup_app(MockRuntime::succeeding("web_1"));

    let req = Request::builder()
        .method("POST")
        .uri("/delete-container")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"name":"web_1"}"#))
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_container_missing_name() {
    let cases = [
        "",
        "{}",
        "not json",
        r#"{"name":""}"#,
        r#"{"name":"   "}"#,
        r#"{"name":null}"#,
        r#"{"name":7}"#,
        r#"{"other":"web_1"}"#,
    ];

    for case in cases {
        let app = app_helper::setup_app(MockRuntime::succeeding("unused"));

        let res = app
            .router
            .clone()
            .oneshot(app_helper::delete_request(case))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {:?}", case);
        let body = app_helper::json_body(res).await;
        assert_eq!(body, serde_json::json!({"error": "Container name is required"}));

        // 入力不備の場合はランタイムを呼ばない
        assert!(app.runtime.calls().is_empty());
    }
}

#[tokio::test]
async fn test_delete_container_without_content_type() {
    let app = app_helper::setup_app(MockRuntime::succeeding("unused"));

    let req = Request::builder()
        .method("POST")
        .uri("/delete-container/")
        .body(Body::empty())
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::json_body(res).await;
    assert_eq!(body["error"], "Container name is required");
}

#[tokio::test]
async fn test_delete_container_runtime_error_surfaces_stderr() {
    let app = app_helper::setup_app(MockRuntime::failing(
        "Error response from daemon: No such container: ghost",
        1,
    ));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"ghost"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::json_body(res).await;
    assert_eq!(
        body["error"],
        "Error deleting container: Error response from daemon: No such container: ghost"
    );
}

#[tokio::test]
async fn test_delete_container_stderr_with_zero_exit_is_failure() {
    let app = app_helper::setup_app(MockRuntime::failing("WARNING: something odd", 0));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::json_body(res).await;
    assert_eq!(body["error"], "Error deleting container: WARNING: something odd");
}

#[tokio::test]
async fn test_delete_container_nonzero_exit_without_stderr() {
    let app = app_helper::setup_app(MockRuntime::failing("", 125));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::json_body(res).await;
    assert_eq!(
        body["error"],
        "Error deleting container: runtime exited with status 125"
    );
}

#[tokio::test]
async fn test_delete_container_authentication_failure() {
    let app = app_helper::setup_app(MockRuntime::new(MockBehavior::AuthenticationFailure));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = app_helper::json_body(res).await;
    assert_eq!(body, serde_json::json!({"error": "Authentication failed"}));
}

#[tokio::test]
async fn test_delete_container_connection_failure() {
    let app = app_helper::setup_app(MockRuntime::new(MockBehavior::ConnectionFailure(
        "10.0.0.5:22: Connection refused".to_string(),
    )));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = app_helper::json_body(res).await;
    assert_eq!(
        body["error"],
        "SSH connection failed: 10.0.0.5:22: Connection refused"
    );
}

#[tokio::test]
async fn test_delete_container_unclassified_failure() {
    let app = app_helper::setup_app(MockRuntime::new(MockBehavior::SpawnFailure));

    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(r#"{"name":"web_1"}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = app_helper::json_body(res).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("An error occurred: "));
    assert!(error.contains("docker: not found"));
}

#[tokio::test]
async fn test_delete_container_body_too_large() {
    let app = app_helper::setup_app(MockRuntime::succeeding("unused"));

    let name = "x".repeat(container_api::api::BODY_LIMIT + 1);
    let res = app
        .router
        .clone()
        .oneshot(app_helper::delete_request(&format!(r#"{{"name":"{}"}}"#, name)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = app_helper::json_body(res).await;
    assert_eq!(body, serde_json::json!({"error": "Container name is required"}));
    assert!(app.runtime.calls().is_empty());
}

#[tokio::test]
async fn test_delete_container_declared_length_over_limit() {
    let app = app_helper::setup_app(MockRuntime::succeeding("unused"));

    let payload = format!(
        r#"{{"name":"{}"}}"#,
        "x".repeat(container_api::api::BODY_LIMIT + 1)
    );
    let req = Request::builder()
        .method("POST")
        .uri("/delete-container/")
        .header("content-type", "application/json")
        .header("content-length", payload.len())
        .body(Body::from(payload))
        .unwrap();
    let res = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = app_helper::json_body(res).await;
    assert_eq!(body, serde_json::json!({"error": "Container name is required"}));
    assert!(app.runtime.calls().is_empty());
}
