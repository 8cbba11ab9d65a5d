//! Environment API endpoints
//!
//! The API exposes no delete endpoint for environments.

use crate::PopsinkClient;
use crate::error::Result;
use popsink_core::domain::env::Env;
use popsink_core::dto::env::{CreateEnv, UpdateEnv};
use reqwest::{Method, StatusCode};

impl PopsinkClient {
    // =============================================================================
    // Environment Management
    // =============================================================================

    /// Create a new environment
    pub async fn create_env(&self, req: &CreateEnv) -> Result<Env> {
        let response = self.send_json(Method::POST, "/envs/", req).await?;

        self.handle_response(response).await
    }

    /// Get an environment by ID
    ///
    /// # Returns
    /// `None` when the API answers 404
    pub async fn get_env(&self, env_id: &str) -> Result<Option<Env>> {
        let response = self.send(Method::GET, &format!("/envs/{}", env_id)).await?;

        self.handle_optional_response(response, &[StatusCode::NOT_FOUND])
            .await
    }

    /// Update the given fields of an environment
    pub async fn update_env(&self, env_id: &str, req: &UpdateEnv) -> Result<Env> {
        let response = self
            .send_json(Method::PATCH, &format!("/envs/{}", env_id), req)
            .await?;

        self.handle_response(response).await
    }
}
