//! Environment DTOs

use crate::domain::env::BrokerConfiguration;
use serde::{Deserialize, Serialize};

/// Request to create a new environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEnv {
    pub name: String,
    pub use_retention: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_configuration: Option<BrokerConfiguration>,
}

/// Partial update of an environment
///
/// `retention_configuration: Some(None)` is sent as an explicit `null`,
/// which clears the configuration remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEnv {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_retention: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_configuration: Option<Option<BrokerConfiguration>>,
}
