//! `popsink_pipeline` resource
//!
//! The `json_configuration` attribute always holds the user's own JSON text.
//! The API re-encodes configurations on the way back, so responses never
//! overwrite it.

use super::ClientSlot;
use crate::framework::validators::{length_at_least, one_of};
use crate::framework::{
    Attribute, CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, Diagnostic,
    Diagnostics, ReadRequest, ReadResponse, Resource, Schema, StringValidator, UpdateRequest,
    UpdateResponse, Value,
};
use async_trait::async_trait;
use popsink_core::domain::pipeline::{ConnectorType, Pipeline, PipelineConfiguration, PipelineState};
use popsink_core::dto::pipeline::{CreatePipeline, UpdatePipeline};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const JSON_CONFIGURATION: &str = "json_configuration";

/// Tracked state of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineModel {
    #[serde(default)]
    pub id: Value<String>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub team_id: Value<String>,
    #[serde(default)]
    pub team_name: Value<String>,
    #[serde(default)]
    pub state: Value<String>,
    #[serde(default)]
    pub json_configuration: Value<String>,
}

impl PipelineModel {
    /// Copy an API record into the model, leaving `json_configuration` alone
    fn apply(&mut self, pipeline: &Pipeline) {
        self.id = Value::known(pipeline.id.clone());
        self.name = Value::known(pipeline.name.clone());
        self.team_id = Value::known(pipeline.team_id.clone());
        self.team_name = Value::known(pipeline.team_name.clone());
        self.state = Value::known(pipeline.state.to_string());
    }

    fn configuration(&self) -> Result<PipelineConfiguration, Diagnostic> {
        serde_json::from_str(&self.json_configuration.value_string()).map_err(|e| {
            Diagnostic::error(
                "Invalid JSON Configuration",
                format!("Could not parse json_configuration: {}", e),
            )
            .at(JSON_CONFIGURATION)
        })
    }

    fn pipeline_state(&self) -> Result<PipelineState, Diagnostic> {
        self.state
            .value_string()
            .parse()
            .map_err(|e: String| Diagnostic::error("Invalid Pipeline State", e).at("state"))
    }
}

/// Checks that `source_type` and `target_type` inside a pipeline
/// configuration name known connector types
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorTypeValidator;

impl ConnectorTypeValidator {
    fn check(
        attribute: &str,
        field: &str,
        summary: &str,
        value: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(value) = value else {
            return;
        };
        if value.parse::<ConnectorType>().is_err() {
            diagnostics.add_attribute_error(
                attribute,
                summary,
                format!("{} must be one of: {}, got: {}", field, connector_types(), value),
            );
        }
    }
}

fn connector_types() -> String {
    ConnectorType::ALL
        .iter()
        .map(ConnectorType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl StringValidator for ConnectorTypeValidator {
    fn description(&self) -> String {
        "validates that source_type and target_type in JSON configuration are valid connector types"
            .to_string()
    }

    fn validate(&self, attribute: &str, value: &str, diagnostics: &mut Diagnostics) {
        let config: PipelineConfiguration = match serde_json::from_str(value) {
            Ok(config) => config,
            Err(e) => {
                diagnostics.add_attribute_error(
                    attribute,
                    "Invalid JSON",
                    format!("Configuration must be valid JSON: {}", e),
                );
                return;
            }
        };

        Self::check(
            attribute,
            "source_type",
            "Invalid Source Type",
            config.source_type.as_deref(),
            diagnostics,
        );
        Self::check(
            attribute,
            "target_type",
            "Invalid Target Type",
            config.target_type.as_deref(),
            diagnostics,
        );
    }
}

/// Handler for `popsink_pipeline`
#[derive(Debug, Clone)]
pub struct PipelineResource {
    client: ClientSlot,
}

impl PipelineResource {
    pub fn new(client: ClientSlot) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for PipelineResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_pipeline", provider_type_name)
    }

    fn schema(&self) -> Schema {
        let states = PipelineState::ALL.map(|state| state.as_str());

        Schema::new("Manages a Popsink pipeline resource.")
            .with_attribute(
                "id",
                Attribute::computed_string("The unique identifier of the pipeline.")
                    .use_state_for_unknown(),
            )
            .with_attribute("name", Attribute::required_string("The name of the pipeline."))
            .with_attribute(
                "team_id",
                Attribute::required_string("The UUID of the team that owns the pipeline."),
            )
            .with_attribute(
                "team_name",
                Attribute::computed_string("The name of the team that owns the pipeline."),
            )
            .with_attribute(
                "state",
                Attribute::required_string(format!(
                    "The state of the pipeline. Valid values: {}.",
                    states.join(", ")
                ))
                .with_validator(one_of(states)),
            )
            .with_attribute(
                JSON_CONFIGURATION,
                Attribute::required_string(format!(
                    "The complete configuration of the pipeline as a JSON string. \
                     The source_type and target_type fields must be one of: {}.",
                    connector_types()
                ))
                .with_validator(length_at_least(1))
                .with_validator(ConnectorTypeValidator),
            )
    }

    async fn create(&self, req: CreateRequest) -> CreateResponse {
        let mut resp = CreateResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<PipelineModel>()) else {
            return resp;
        };
        let Some(json_configuration) = resp.diagnostics.capture(plan.configuration()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(plan.pipeline_state()) else {
            return resp;
        };

        let create = CreatePipeline {
            name: plan.name.value_string(),
            team_id: plan.team_id.value_string(),
            state,
            json_configuration,
        };

        let pipeline = match client.create_pipeline(&create).await {
            Ok(pipeline) => pipeline,
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Creating Pipeline",
                    format!("Could not create pipeline: {}", err),
                );
                return resp;
            }
        };

        plan.apply(&pipeline);
        info!(id = %pipeline.id, state = %pipeline.state, "Created pipeline");

        resp.diagnostics.capture(resp.state.set(&plan));
        resp
    }

    async fn read(&self, req: ReadRequest) -> ReadResponse {
        let mut resp = ReadResponse {
            state: req.state.clone(),
            ..Default::default()
        };

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut state) = resp.diagnostics.capture(req.state.get::<PipelineModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        match client.get_pipeline(&id).await {
            Ok(Some(pipeline)) => {
                state.apply(&pipeline);
                resp.diagnostics.capture(resp.state.set(&state));
            }
            Ok(None) => {
                warn!(%id, "Pipeline not found, removing from state");
                resp.state.remove_resource();
            }
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Reading Pipeline",
                    format!("Could not read pipeline {}: {}", id, err),
                );
            }
        }

        resp
    }

    async fn update(&self, req: UpdateRequest) -> UpdateResponse {
        let mut resp = UpdateResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<PipelineModel>()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(req.state.get::<PipelineModel>()) else {
            return resp;
        };

        let mut update = UpdatePipeline::default();

        if plan.name != state.name {
            update.name = Some(plan.name.value_string());
        }

        if plan.team_id != state.team_id {
            update.team_id = Some(plan.team_id.value_string());
        }

        if plan.state != state.state {
            let Some(pipeline_state) = resp.diagnostics.capture(plan.pipeline_state()) else {
                return resp;
            };
            update.state = Some(pipeline_state);
        }

        if plan.json_configuration != state.json_configuration {
            let Some(json_configuration) = resp.diagnostics.capture(plan.configuration()) else {
                return resp;
            };
            update.json_configuration = Some(json_configuration);
        }

        let id = state.id.value_string();
        let pipeline = match client.update_pipeline(&id, &update).await {
            Ok(pipeline) => pipeline,
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Updating Pipeline",
                    format!("Could not update pipeline {}: {}", id, err),
                );
                return resp;
            }
        };

        plan.apply(&pipeline);
        info!(id = %pipeline.id, state = %pipeline.state, "Updated pipeline");

        resp.diagnostics.capture(resp.state.set(&plan));
        resp
    }

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse {
        let mut resp = DeleteResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(req.state.get::<PipelineModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        if let Err(err) = client.delete_pipeline(&id).await {
            resp.diagnostics.add_error(
                "Error Deleting Pipeline",
                format!("Could not delete pipeline {}: {}", id, err),
            );
            return resp;
        }

        info!(%id, "Deleted pipeline");
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Plan;
    use serde_json::json;

    #[test]
    fn test_connector_validator_accepts_known_types() {
        let mut diags = Diagnostics::new();
        ConnectorTypeValidator.validate(
            JSON_CONFIGURATION,
            r#"{"source_type": "KAFKA_SOURCE", "target_type": "ORACLE_TARGET"}"#,
            &mut diags,
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn test_connector_validator_rejects_unknown_types() {
        let mut diags = Diagnostics::new();
        ConnectorTypeValidator.validate(
            JSON_CONFIGURATION,
            r#"{"source_type": "POSTGRES_SOURCE", "target_type": "S3_TARGET"}"#,
            &mut diags,
        );

        let summaries: Vec<_> = diags.errors().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Invalid Source Type", "Invalid Target Type"]);
        let detail = &diags.errors().next().unwrap().detail;
        assert!(detail.contains("JOB_SMT, KAFKA_SOURCE, ORACLE_TARGET"));
    }

    #[test]
    fn test_connector_validator_rejects_invalid_json() {
        let mut diags = Diagnostics::new();
        ConnectorTypeValidator.validate(JSON_CONFIGURATION, "{", &mut diags);
        assert_eq!(diags.errors().next().unwrap().summary, "Invalid JSON");
    }

    #[test]
    fn test_apply_keeps_user_configuration() {
        let mut model = PipelineModel {
            json_configuration: Value::known(r#"{ "source_name": "orders" }"#),
            ..Default::default()
        };
        model.apply(&Pipeline {
            id: "pl-1".to_string(),
            name: "p1".to_string(),
            state: PipelineState::Paused,
            team_id: "t1".to_string(),
            team_name: "Team One".to_string(),
            json_configuration: Some(PipelineConfiguration::default()),
        });

        assert_eq!(model.state, Value::known("paused"));
        assert_eq!(model.team_name, Value::known("Team One"));
        assert_eq!(model.json_configuration, Value::known(r#"{ "source_name": "orders" }"#));
    }

    #[test]
    fn test_schema_rejects_unknown_state() {
        let resource = PipelineResource::new(ClientSlot::new());
        let diags = resource.schema().validate_config(&json!({
            "name": "p1",
            "team_id": "t1",
            "state": "running",
            "json_configuration": "{}"
        }));
        let error = diags.errors().next().unwrap();
        assert_eq!(error.attribute.as_deref(), Some("state"));
    }

    #[tokio::test]
    async fn test_create_with_malformed_configuration_reports_error() {
        let slot = ClientSlot::new();
        slot.set(popsink_client::PopsinkClient::new("http://127.0.0.1:9", "t").unwrap());

        let resp = PipelineResource::new(slot)
            .create(CreateRequest {
                plan: Plan::new(json!({
                    "name": "p1",
                    "team_id": "t1",
                    "state": "draft",
                    "json_configuration": "[1, 2"
                })),
            })
            .await;

        assert_eq!(
            resp.diagnostics.errors().next().unwrap().summary,
            "Invalid JSON Configuration"
        );
    }
}
