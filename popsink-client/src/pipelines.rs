//! Pipeline API endpoints

use crate::PopsinkClient;
use crate::error::Result;
use popsink_core::domain::pipeline::Pipeline;
use popsink_core::dto::pipeline::{CreatePipeline, UpdatePipeline};
use reqwest::{Method, StatusCode};

impl PopsinkClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// Create a new pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use popsink_client::PopsinkClient;
    /// # use popsink_core::domain::pipeline::{PipelineConfiguration, PipelineState};
    /// # use popsink_core::dto::pipeline::CreatePipeline;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PopsinkClient::new("https://api.popsink.com", "my-token")?;
    /// let pipeline = client.create_pipeline(&CreatePipeline {
    ///     name: "orders-to-oracle".to_string(),
    ///     team_id: "team-123".to_string(),
    ///     state: PipelineState::Draft,
    ///     json_configuration: PipelineConfiguration::default(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_pipeline(&self, req: &CreatePipeline) -> Result<Pipeline> {
        let response = self.send_json(Method::POST, "/pipelines/", req).await?;

        self.handle_response(response).await
    }

    /// Get a pipeline by ID
    ///
    /// The API answers 403 for pipelines that were deleted or moved out of
    /// the token's reach, so 403 is treated like 404.
    ///
    /// # Returns
    /// `None` when the pipeline is absent
    pub async fn get_pipeline(&self, pipeline_id: &str) -> Result<Option<Pipeline>> {
        let response = self
            .send(Method::GET, &format!("/pipelines/{}", pipeline_id))
            .await?;

        self.handle_optional_response(response, &[StatusCode::NOT_FOUND, StatusCode::FORBIDDEN])
            .await
    }

    /// Update the given fields of a pipeline
    pub async fn update_pipeline(
        &self,
        pipeline_id: &str,
        req: &UpdatePipeline,
    ) -> Result<Pipeline> {
        let response = self
            .send_json(Method::PATCH, &format!("/pipelines/{}", pipeline_id), req)
            .await?;

        self.handle_response(response).await
    }

    /// Delete a pipeline
    ///
    /// Deleting a pipeline that no longer exists succeeds.
    pub async fn delete_pipeline(&self, pipeline_id: &str) -> Result<()> {
        let response = self
            .send(Method::DELETE, &format!("/pipelines/{}", pipeline_id))
            .await?;

        self.handle_delete_response(response).await
    }
}
