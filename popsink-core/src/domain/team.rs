//! Team domain types

use serde::{Deserialize, Serialize};

/// A team as returned by `/teams/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub env_id: Option<String>,
}
