//! Team API endpoints

use crate::PopsinkClient;
use crate::error::Result;
use popsink_core::domain::team::Team;
use popsink_core::dto::team::{CreateTeam, UpdateTeam};
use reqwest::{Method, StatusCode};

impl PopsinkClient {
    // =============================================================================
    // Team Management
    // =============================================================================

    /// Create a new team
    ///
    /// # Arguments
    /// * `req` - The team creation request
    ///
    /// # Returns
    /// The created team, including its server-assigned ID
    pub async fn create_team(&self, req: &CreateTeam) -> Result<Team> {
        let response = self.send_json(Method::POST, "/teams/", req).await?;

        self.handle_response(response).await
    }

    /// Get a team by ID
    ///
    /// # Returns
    /// `None` when the API answers 404
    pub async fn get_team(&self, team_id: &str) -> Result<Option<Team>> {
        let response = self.send(Method::GET, &format!("/teams/{}", team_id)).await?;

        self.handle_optional_response(response, &[StatusCode::NOT_FOUND])
            .await
    }

    /// Update the given fields of a team
    pub async fn update_team(&self, team_id: &str, req: &UpdateTeam) -> Result<Team> {
        let response = self
            .send_json(Method::PATCH, &format!("/teams/{}", team_id), req)
            .await?;

        self.handle_response(response).await
    }

    /// Delete a team
    ///
    /// Deleting a team that no longer exists succeeds.
    pub async fn delete_team(&self, team_id: &str) -> Result<()> {
        let response = self
            .send(Method::DELETE, &format!("/teams/{}", team_id))
            .await?;

        self.handle_delete_response(response).await
    }
}
