//! `popsink_env` resource
//!
//! Environments cannot be deleted through the API. Destroying one only drops
//! it from tracked state and reports a warning.

use super::ClientSlot;
use crate::framework::{
    Attribute, CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, Diagnostic,
    ReadRequest, ReadResponse, Resource, Schema, UpdateRequest, UpdateResponse, Value,
};
use async_trait::async_trait;
use popsink_core::domain::env::{BrokerConfiguration, Env, normalize_retention_config};
use popsink_core::dto::env::{CreateEnv, UpdateEnv};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

const RETENTION_CONFIGURATION: &str = "retention_configuration";

/// Tracked state of an environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvModel {
    #[serde(default)]
    pub id: Value<String>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub use_retention: Value<bool>,
    /// Retention settings as a JSON object string
    #[serde(default)]
    pub retention_configuration: Value<String>,
}

impl EnvModel {
    /// Copy an API record into the model
    fn apply(&mut self, env: &Env) -> Result<(), Diagnostic> {
        self.id = Value::known(env.id.clone());
        self.name = Value::known(env.name.clone());
        self.use_retention = Value::Known(env.use_retention);
        self.retention_configuration = match &env.retention_configuration {
            Some(config) => Value::Known(encode_retention(config)?),
            None => Value::Null,
        };
        Ok(())
    }

    /// The retention settings to send, if the attribute carries any
    fn retention(&self) -> Result<Option<BrokerConfiguration>, Diagnostic> {
        self.retention_configuration
            .non_empty()
            .map(|text| {
                serde_json::from_str(text).map_err(|e| {
                    Diagnostic::error(
                        "Invalid JSON",
                        format!("Could not parse retention_configuration as JSON: {}", e),
                    )
                    .at(RETENTION_CONFIGURATION)
                })
            })
            .transpose()
    }
}

fn encode_retention(config: &BrokerConfiguration) -> Result<String, Diagnostic> {
    serde_json::to_string(&normalize_retention_config(config)).map_err(|e| {
        Diagnostic::error(
            "Error Marshaling Retention Configuration",
            format!("Could not marshal retention configuration: {}", e),
        )
    })
}

/// Handler for `popsink_env`
#[derive(Debug, Clone)]
pub struct EnvResource {
    client: ClientSlot,
}

impl EnvResource {
    pub fn new(client: ClientSlot) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for EnvResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_env", provider_type_name)
    }

    fn schema(&self) -> Schema {
        Schema::new("Manages a Popsink environment resource.")
            .with_attribute(
                "id",
                Attribute::computed_string("The unique identifier of the environment.")
                    .use_state_for_unknown(),
            )
            .with_attribute(
                "name",
                Attribute::required_string("The name of the environment."),
            )
            .with_attribute(
                "use_retention",
                Attribute::optional_bool(
                    "Whether message retention is enabled for this environment.",
                )
                .computed()
                .with_default(json!(false)),
            )
            .with_attribute(
                RETENTION_CONFIGURATION,
                Attribute::optional_string(
                    "Retention policy configuration as a JSON string. Only used when use_retention is true.",
                ),
            )
    }

    async fn create(&self, req: CreateRequest) -> CreateResponse {
        let mut resp = CreateResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<EnvModel>()) else {
            return resp;
        };
        let Some(retention_configuration) = resp.diagnostics.capture(plan.retention()) else {
            return resp;
        };

        let create = CreateEnv {
            name: plan.name.value_string(),
            use_retention: plan.use_retention.value_bool(),
            retention_configuration,
        };

        let env = match client.create_env(&create).await {
            Ok(env) => env,
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Creating Environment",
                    format!("Could not create environment: {}", err),
                );
                return resp;
            }
        };

        if resp.diagnostics.capture(plan.apply(&env)).is_none() {
            return resp;
        }

        info!(id = %env.id, "Created environment");

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
        let Some(mut state) = resp.diagnostics.capture(req.state.get::<EnvModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        let env = match client.get_env(&id).await {
            Ok(Some(env)) => env,
            Ok(None) => {
                warn!(%id, "Environment not found, removing from state");
                resp.state.remove_resource();
                return resp;
            }
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Reading Environment",
                    format!("Could not read environment {}: {}", id, err),
                );
                return resp;
            }
        };

        if resp.diagnostics.capture(state.apply(&env)).is_none() {
            return resp;
        }

        resp.diagnostics.capture(resp.state.set(&state));
        resp
    }

    async fn update(&self, req: UpdateRequest) -> UpdateResponse {
        let mut resp = UpdateResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<EnvModel>()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(req.state.get::<EnvModel>()) else {
            return resp;
        };

        let mut update = UpdateEnv::default();

        if plan.name != state.name {
            update.name = Some(plan.name.value_string());
        }

        if plan.use_retention != state.use_retention {
            update.use_retention = Some(plan.use_retention.value_bool());
        }

        if plan.retention_configuration != state.retention_configuration {
            let Some(retention_configuration) = resp.diagnostics.capture(plan.retention()) else {
                return resp;
            };
            update.retention_configuration = Some(retention_configuration);
        }

        let id = state.id.value_string();
        let env = match client.update_env(&id, &update).await {
            Ok(env) => env,
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Updating Environment",
                    format!("Could not update environment {}: {}", id, err),
                );
                return resp;
            }
        };

        if resp.diagnostics.capture(plan.apply(&env)).is_none() {
            return resp;
        }

        info!(id = %env.id, "Updated environment");

        resp.diagnostics.capture(resp.state.set(&plan));
        resp
    }

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse {
        let mut resp = DeleteResponse::default();

        let Some(state) = resp.diagnostics.capture(req.state.get::<EnvModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        resp.diagnostics.add_warning(
            "Environment Deletion Not Supported",
            format!(
                "The Popsink API does not support deleting environments. Environment {} has been removed \
                 from Terraform state but still exists in the API. Please manage environment deletion \
                 through the Popsink web interface or API directly.",
                id
            ),
        );

        warn!(%id, "Environment removed from state (deletion not supported by API)");
        resp
    }
}
