//! A full host session over the line protocol

use popsink_provider::{PopsinkProvider, server};
use serde_json::{Value as Json, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session(provider: &PopsinkProvider, requests: &[Json]) -> Vec<Json> {
    let input: String = requests
        .iter()
        .map(|request| format!("{}\n", request))
        .collect();
    let mut output = Vec::new();

    server::serve(provider, input.as_bytes(), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_team_session() {
    let api = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/teams/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "team-1", "name": "data", "description": "Data team"
        })))
        .expect(1)
        .mount(&api)
        .await;

    let provider = PopsinkProvider::default();
    let config = json!({"name": "data", "description": "Data team"});
    let responses = session(
        &provider,
        &[
            json!({"method": "configure_provider", "config": {"base_url": api.uri(), "token": "t"}}),
            json!({"method": "validate_resource_config", "type_name": "popsink_team", "config": config}),
            json!({"method": "plan_resource_change", "type_name": "popsink_team", "prior_state": null, "proposed_new_state": config}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0], json!({"diagnostics": []}));
    assert_eq!(responses[1], json!({"diagnostics": []}));
    assert_eq!(responses[2]["action"], "create");

    let planned = responses[2]["planned_state"].clone();
    let responses = session(
        &provider,
        &[
            json!({"method": "apply_resource_change", "type_name": "popsink_team", "prior_state": null, "planned_state": planned}),
            json!({"method": "stop_provider"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["diagnostics"], json!([]));
    assert_eq!(responses[0]["new_state"]["id"], "team-1");
    assert!(responses[0]["new_state"]["env_id"].is_null());
}

#[tokio::test]
async fn test_unconfigured_apply_reports_error() {
    let provider = PopsinkProvider::default();
    let responses = session(
        &provider,
        &[json!({
            "method": "apply_resource_change",
            "type_name": "popsink_pipeline",
            "prior_state": null,
            "planned_state": {"name": "p1", "team_id": "t1", "state": "draft", "json_configuration": "{}"}
        })],
    )
    .await;

    assert_eq!(responses[0]["diagnostics"][0]["severity"], "error");
    assert_eq!(responses[0]["diagnostics"][0]["summary"], "Unconfigured Provider");
    assert!(responses[0]["new_state"].is_null());
}

#[test]
fn test_configure_without_settings_reports_missing_values() {
    let provider = PopsinkProvider::default();
    let resp = temp_env::with_vars(
        [("POPSINK_BASE_URL", None::<&str>), ("POPSINK_TOKEN", None::<&str>)],
        || provider.configure(&json!({})),
    );
    let encoded = serde_json::to_value(&resp).unwrap();

    let summaries: Vec<_> = encoded["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["summary"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(summaries, vec!["Missing Base URL", "Missing API Token"]);
    assert_eq!(encoded["diagnostics"][0]["attribute"], "base_url");
}
