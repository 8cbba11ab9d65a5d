//! Team DTOs

use serde::{Deserialize, Serialize};

/// Request to create a new team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_id: Option<String>,
}

/// Partial update of a team
///
/// `env_id: Some(None)` detaches the team from its environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTeam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_id: Option<Option<String>>,
}
