//! Pipeline DTOs

use crate::domain::pipeline::{PipelineConfiguration, PipelineState};
use serde::{Deserialize, Serialize};

/// Request to create a new pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
    pub team_id: String,
    pub state: PipelineState,
    pub json_configuration: PipelineConfiguration,
}

/// Partial update of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PipelineState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_configuration: Option<PipelineConfiguration>,
}
