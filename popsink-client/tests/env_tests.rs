//! Environment endpoints against a mocked Popsink API

use popsink_client::PopsinkClient;
use popsink_core::dto::env::{CreateEnv, UpdateEnv};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PopsinkClient {
    PopsinkClient::new(server.uri(), "test-token").unwrap()
}

#[tokio::test]
async fn test_create_env() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/envs/"))
        .and(body_json(json!({"name": "test-env", "use_retention": true})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "env-123",
            "name": "test-env",
            "use_retention": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = client_for(&server)
        .create_env(&CreateEnv {
            name: "test-env".to_string(),
            use_retention: true,
            retention_configuration: None,
        })
        .await
        .unwrap();

    assert_eq!(env.id, "env-123");
    assert_eq!(env.name, "test-env");
    assert!(env.use_retention);
}

#[tokio::test]
async fn test_create_env_with_retention_configuration() {
    let server = MockServer::start().await;
    let retention = json!({"retention_ms": 86400000});

    Mock::given(method("POST"))
        .and(path("/envs/"))
        .and(body_json(json!({
            "name": "kept",
            "use_retention": true,
            "retention_configuration": retention
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "env-9",
            "name": "kept",
            "use_retention": true,
            "retention_configuration": {"retention_ms": 86400000, "cleanup_policy": null}
        })))
        .mount(&server)
        .await;

    let env = client_for(&server)
        .create_env(&CreateEnv {
            name: "kept".to_string(),
            use_retention: true,
            retention_configuration: retention.as_object().cloned(),
        })
        .await
        .unwrap();

    let config = env.retention_configuration.unwrap();
    assert_eq!(config["retention_ms"], json!(86400000));
}

#[tokio::test]
async fn test_get_env() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/envs/env-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "env-123",
            "name": "test-env",
            "use_retention": false
        })))
        .mount(&server)
        .await;

    let env = client_for(&server).get_env("env-123").await.unwrap();
    assert_eq!(env.unwrap().id, "env-123");
}

#[tokio::test]
async fn test_get_env_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/envs/nonexistent"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let env = client_for(&server).get_env("nonexistent").await.unwrap();
    assert!(env.is_none());
}

#[tokio::test]
async fn test_get_env_forbidden_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/envs/env-123"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_env("env-123").await.unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_update_env_sends_only_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/envs/env-123"))
        .and(body_json(json!({"name": "updated-env"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "env-123",
            "name": "updated-env",
            "use_retention": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = client_for(&server)
        .update_env(
            "env-123",
            &UpdateEnv {
                name: Some("updated-env".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(env.name, "updated-env");
}
