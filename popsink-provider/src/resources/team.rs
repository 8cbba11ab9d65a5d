//! `popsink_team` resource

use super::ClientSlot;
use crate::framework::{
    Attribute, CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ReadRequest,
    ReadResponse, Resource, Schema, UpdateRequest, UpdateResponse, Value,
};
use async_trait::async_trait;
use popsink_core::domain::team::Team;
use popsink_core::dto::team::{CreateTeam, UpdateTeam};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Tracked state of a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamModel {
    #[serde(default)]
    pub id: Value<String>,
    #[serde(default)]
    pub name: Value<String>,
    #[serde(default)]
    pub description: Value<String>,
    #[serde(default)]
    pub env_id: Value<String>,
}

impl TeamModel {
    fn apply(&mut self, team: &Team) {
        self.id = Value::known(team.id.clone());
        self.name = Value::known(team.name.clone());
        self.description = Value::known(team.description.clone());
        self.env_id = team.env_id.clone().into();
    }
}

/// Handler for `popsink_team`
#[derive(Debug, Clone)]
pub struct TeamResource {
    client: ClientSlot,
}

impl TeamResource {
    pub fn new(client: ClientSlot) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for TeamResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{}_team", provider_type_name)
    }

    fn schema(&self) -> Schema {
        Schema::new("Manages a Popsink team resource.")
            .with_attribute(
                "id",
                Attribute::computed_string("The unique identifier of the team.")
                    .use_state_for_unknown(),
            )
            .with_attribute("name", Attribute::required_string("The name of the team."))
            .with_attribute(
                "description",
                Attribute::required_string("Short description of the team."),
            )
            .with_attribute(
                "env_id",
                Attribute::optional_string("Optional environment ID the team is associated with."),
            )
    }

    async fn create(&self, req: CreateRequest) -> CreateResponse {
        let mut resp = CreateResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<TeamModel>()) else {
            return resp;
        };

        let create = CreateTeam {
            name: plan.name.value_string(),
            description: plan.description.value_string(),
            env_id: plan.env_id.as_known().cloned(),
        };

        let team = match client.create_team(&create).await {
            Ok(team) => team,
            Err(err) => {
                resp.diagnostics
                    .add_error("Error Creating Team", format!("Could not create team: {}", err));
                return resp;
            }
        };

        plan.apply(&team);
        info!(id = %team.id, "Created team");

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
        let Some(mut state) = resp.diagnostics.capture(req.state.get::<TeamModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        match client.get_team(&id).await {
            Ok(Some(team)) => {
                state.apply(&team);
                resp.diagnostics.capture(resp.state.set(&state));
            }
            Ok(None) => {
                warn!(%id, "Team not found, removing from state");
                resp.state.remove_resource();
            }
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Reading Team",
                    format!("Could not read team {}: {}", id, err),
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
        let Some(mut plan) = resp.diagnostics.capture(req.plan.get::<TeamModel>()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(req.state.get::<TeamModel>()) else {
            return resp;
        };

        let mut update = UpdateTeam::default();

        if plan.name != state.name {
            update.name = Some(plan.name.value_string());
        }

        if plan.description != state.description {
            update.description = Some(plan.description.value_string());
        }

        if plan.env_id != state.env_id {
            // A null plan value detaches the team from its environment.
            update.env_id = Some(plan.env_id.as_known().cloned());
        }

        let id = state.id.value_string();
        let team = match client.update_team(&id, &update).await {
            Ok(team) => team,
            Err(err) => {
                resp.diagnostics.add_error(
                    "Error Updating Team",
                    format!("Could not update team {}: {}", id, err),
                );
                return resp;
            }
        };

        plan.apply(&team);
        info!(id = %team.id, "Updated team");

        resp.diagnostics.capture(resp.state.set(&plan));
        resp
    }

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse {
        let mut resp = DeleteResponse::default();

        let Some(client) = resp.diagnostics.capture(self.client.get()) else {
            return resp;
        };
        let Some(state) = resp.diagnostics.capture(req.state.get::<TeamModel>()) else {
            return resp;
        };
        let id = state.id.value_string();

        if let Err(err) = client.delete_team(&id).await {
            resp.diagnostics.add_error(
                "Error Deleting Team",
                format!("Could not delete team {}: {}", id, err),
            );
            return resp;
        }

        info!(%id, "Deleted team");
        resp
    }
}
