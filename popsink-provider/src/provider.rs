//! The Popsink provider
//!
//! Owns the resource registry and the shared API client, and turns host
//! protocol calls into resource operations. Every call answers with
//! diagnostics instead of failing.

use crate::config::{ProviderConfig, ProviderModel, provider_schema};
use crate::framework::{
    CreateRequest, DeleteRequest, Diagnostic, Diagnostics, ImportStateRequest, Plan, PlanAction,
    ReadRequest, Resource, Schema, State, UpdateRequest, plan_resource_change,
};
use crate::resources::{ClientSlot, EnvResource, PipelineResource, TeamResource};
use popsink_client::PopsinkClient;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Provider type name, the prefix of every resource type
pub const TYPE_NAME: &str = "popsink";

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct GetProviderSchemaResponse {
    pub provider: Schema,
    pub resource_schemas: BTreeMap<String, Schema>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct DiagnosticsResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct PlanResourceChangeResponse {
    pub planned_state: Json,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PlanAction>,
    pub requires_update: bool,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct ApplyResourceChangeResponse {
    pub new_state: Json,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct ReadResourceResponse {
    /// Refreshed state; null when the remote object no longer exists
    pub new_state: Json,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportResourceStateResponse {
    pub imported_state: Json,
    pub diagnostics: Diagnostics,
}

// =============================================================================
// Provider
// =============================================================================

/// The Popsink provider and its resources
pub struct PopsinkProvider {
    version: String,
    client: ClientSlot,
    resources: Vec<Box<dyn Resource>>,
}

impl Default for PopsinkProvider {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

impl PopsinkProvider {
    /// Create an unconfigured provider
    ///
    /// # Arguments
    /// * `version` - Provider version reported to the host
    pub fn new(version: impl Into<String>) -> Self {
        let client = ClientSlot::new();
        let resources: Vec<Box<dyn Resource>> = vec![
            Box::new(PipelineResource::new(client.clone())),
            Box::new(TeamResource::new(client.clone())),
            Box::new(EnvResource::new(client.clone())),
        ];

        Self {
            version: version.into(),
            client,
            resources,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Full type names of every registered resource
    pub fn resource_types(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|resource| resource.type_name(TYPE_NAME))
            .collect()
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, Diagnostic> {
        self.resources
            .iter()
            .find(|resource| resource.type_name(TYPE_NAME) == type_name)
            .map(Box::as_ref)
            .ok_or_else(|| {
                Diagnostic::error(
                    "Unknown Resource Type",
                    format!(
                        "The {} provider does not support resource type {:?}. Supported types: {}.",
                        TYPE_NAME,
                        type_name,
                        self.resource_types().join(", ")
                    ),
                )
            })
    }

    pub fn get_provider_schema(&self) -> GetProviderSchemaResponse {
        let resource_schemas = self
            .resources
            .iter()
            .map(|resource| (resource.type_name(TYPE_NAME), resource.schema()))
            .collect();

        GetProviderSchemaResponse {
            provider: provider_schema(),
            resource_schemas,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Resolve connection settings and build the API client
    ///
    /// # Arguments
    /// * `config` - The provider block; null means nothing was configured
    ///
    /// # Returns
    /// Diagnostics; on success every resource can reach the API.
    pub fn configure(&self, config: &Json) -> DiagnosticsResponse {
        let mut resp = DiagnosticsResponse::default();
        info!("Configuring Popsink client");

        if !config.is_null() {
            resp.diagnostics.append(provider_schema().validate_config(config));
            if resp.diagnostics.has_error() {
                return resp;
            }
        }

        let model = if config.is_null() {
            ProviderModel::default()
        } else {
            match ProviderModel::deserialize(config) {
                Ok(model) => model,
                Err(e) => {
                    resp.diagnostics.add_error(
                        "Invalid Provider Configuration",
                        format!("Could not decode the provider configuration: {}", e),
                    );
                    return resp;
                }
            }
        };

        if model.base_url.is_unknown() || model.token.is_unknown() {
            resp.diagnostics.add_error(
                "Unknown Provider Configuration",
                "The provider cannot create the Popsink API client as the base_url or token \
                 value is not known yet. Set the value statically in the configuration, \
                 or use the POPSINK_BASE_URL and POPSINK_TOKEN environment variables.",
            );
            return resp;
        }

        let settings = match ProviderConfig::resolve(&model) {
            Ok(settings) => settings,
            Err(diagnostics) => {
                resp.diagnostics.append(diagnostics);
                return resp;
            }
        };
        debug!(base_url = %settings.base_url, "Resolved Popsink provider settings");

        match PopsinkClient::new(settings.base_url, settings.token) {
            Ok(client) => {
                info!(base_url = %client.base_url(), "Configured Popsink client");
                self.client.set(client);
            }
            Err(err) => resp.diagnostics.add_error(
                "Unable to Create Popsink API Client",
                format!(
                    "An unexpected error occurred when creating the Popsink API client: {}",
                    err
                ),
            ),
        }

        resp
    }

    pub fn validate_resource_config(&self, type_name: &str, config: &Json) -> DiagnosticsResponse {
        let mut resp = DiagnosticsResponse::default();
        let Some(resource) = resp.diagnostics.capture(self.resource(type_name)) else {
            return resp;
        };

        resp.diagnostics.append(resource.schema().validate_config(config));
        resp
    }

    pub fn plan_resource_change(
        &self,
        type_name: &str,
        prior_state: &Json,
        proposed_new_state: &Json,
    ) -> PlanResourceChangeResponse {
        let mut resp = PlanResourceChangeResponse::default();
        let Some(resource) = resp.diagnostics.capture(self.resource(type_name)) else {
            return resp;
        };

        match plan_resource_change(&resource.schema(), prior_state, proposed_new_state) {
            Ok(change) => {
                debug!(type_name, action = ?change.action, "Planned resource change");
                resp.requires_update = change.requires_update();
                resp.action = Some(change.action);
                resp.planned_state = change.planned_state;
            }
            Err(diagnostics) => resp.diagnostics.append(diagnostics),
        }

        resp
    }

    /// Apply a planned change
    ///
    /// A null prior state creates, a null planned state deletes, anything
    /// else updates.
    pub async fn apply_resource_change(
        &self,
        type_name: &str,
        prior_state: Json,
        planned_state: Json,
    ) -> ApplyResourceChangeResponse {
        let mut resp = ApplyResourceChangeResponse::default();
        let Some(resource) = resp.diagnostics.capture(self.resource(type_name)) else {
            return resp;
        };

        match (prior_state.is_null(), planned_state.is_null()) {
            (true, true) => {}
            (true, false) => {
                let created = resource
                    .create(CreateRequest {
                        plan: Plan::new(planned_state),
                    })
                    .await;
                resp.new_state = created.state.into_raw();
                resp.diagnostics.append(created.diagnostics);
            }
            (false, true) => {
                let deleted = resource
                    .delete(DeleteRequest {
                        state: State::new(prior_state.clone()),
                    })
                    .await;
                if deleted.diagnostics.has_error() {
                    resp.new_state = prior_state;
                }
                resp.diagnostics.append(deleted.diagnostics);
            }
            (false, false) => {
                let updated = resource
                    .update(UpdateRequest {
                        plan: Plan::new(planned_state),
                        state: State::new(prior_state.clone()),
                    })
                    .await;
                resp.new_state = if updated.diagnostics.has_error() && updated.state.is_removed() {
                    prior_state
                } else {
                    updated.state.into_raw()
                };
                resp.diagnostics.append(updated.diagnostics);
            }
        }

        resp
    }

    pub async fn read_resource(
        &self,
        type_name: &str,
        current_state: Json,
    ) -> ReadResourceResponse {
        let mut resp = ReadResourceResponse::default();
        let Some(resource) = resp.diagnostics.capture(self.resource(type_name)) else {
            return resp;
        };

        let read = resource
            .read(ReadRequest {
                state: State::new(current_state),
            })
            .await;

        resp.new_state = read.state.into_raw();
        resp.diagnostics.append(read.diagnostics);
        resp
    }

    pub async fn import_resource_state(
        &self,
        type_name: &str,
        id: &str,
    ) -> ImportResourceStateResponse {
        let mut resp = ImportResourceStateResponse::default();
        let Some(resource) = resp.diagnostics.capture(self.resource(type_name)) else {
            return resp;
        };

        if id.is_empty() {
            resp.diagnostics.add_error(
                "Missing Import Identifier",
                "An identifier is required to import a resource.",
            );
            return resp;
        }

        let imported = resource
            .import_state(ImportStateRequest { id: id.to_string() })
            .await;

        info!(type_name, id, "Imported resource");
        resp.imported_state = imported.state.into_raw();
        resp.diagnostics.append(imported.diagnostics);
        resp
    }
}
