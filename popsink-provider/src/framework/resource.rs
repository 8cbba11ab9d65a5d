//! The resource lifecycle contract

use super::diagnostics::Diagnostics;
use super::document::{Plan, State};
use super::schema::Schema;
use async_trait::async_trait;

pub struct CreateRequest {
    pub plan: Plan,
}

#[derive(Debug, Default)]
pub struct CreateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

pub struct ReadRequest {
    pub state: State,
}

#[derive(Debug, Default)]
pub struct ReadResponse {
    /// Refreshed state; removed when the remote resource is gone
    pub state: State,
    pub diagnostics: Diagnostics,
}

pub struct UpdateRequest {
    pub plan: Plan,
    /// Prior tracked state
    pub state: State,
}

#[derive(Debug, Default)]
pub struct UpdateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

pub struct DeleteRequest {
    pub state: State,
}

#[derive(Debug, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

pub struct ImportStateRequest {
    pub id: String,
}

#[derive(Debug, Default)]
pub struct ImportStateResponse {
    pub state: State,
    pub diagnostics: Diagnostics,
}

/// A managed resource type
///
/// Implementations hold no per-instance state: everything they need arrives
/// in the request and everything they learn leaves in the response.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `popsink_team` for provider `popsink`
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    async fn create(&self, req: CreateRequest) -> CreateResponse;

    async fn read(&self, req: ReadRequest) -> ReadResponse;

    async fn update(&self, req: UpdateRequest) -> UpdateResponse;

    async fn delete(&self, req: DeleteRequest) -> DeleteResponse;

    /// Start tracking an existing remote object by identifier
    ///
    /// The default passes the identifier through to the `id` attribute and
    /// leaves everything else null for the following read to fill in.
    async fn import_state(&self, req: ImportStateRequest) -> ImportStateResponse {
        let mut object = self.schema().null_object();
        object.insert("id".to_string(), serde_json::Value::String(req.id));

        ImportStateResponse {
            state: State::new(serde_json::Value::Object(object)),
            diagnostics: Diagnostics::new(),
        }
    }
}
