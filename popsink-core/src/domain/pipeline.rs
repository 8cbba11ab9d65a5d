//! Pipeline domain types

use crate::serde_util::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Draft,
    Paused,
    Live,
    Error,
    Building,
}

impl PipelineState {
    /// Every state the API accepts, in declaration order
    pub const ALL: [PipelineState; 5] = [
        PipelineState::Draft,
        PipelineState::Paused,
        PipelineState::Live,
        PipelineState::Error,
        PipelineState::Building,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Draft => "draft",
            PipelineState::Paused => "paused",
            PipelineState::Live => "live",
            PipelineState::Error => "error",
            PipelineState::Building => "building",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("unknown pipeline state: {}", s))
    }
}

/// Connector kinds accepted for `source_type` and `target_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectorType {
    JobSmt,
    KafkaSource,
    OracleTarget,
}

impl ConnectorType {
    pub const ALL: [ConnectorType; 3] = [
        ConnectorType::JobSmt,
        ConnectorType::KafkaSource,
        ConnectorType::OracleTarget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorType::JobSmt => "JOB_SMT",
            ConnectorType::KafkaSource => "KAFKA_SOURCE",
            ConnectorType::OracleTarget => "ORACLE_TARGET",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown connector type: {}", s))
    }
}

/// Source, transform and target settings of a pipeline
///
/// Connector types are kept as plain strings so that records carrying a type
/// this crate does not know yet still decode; validation happens where the
/// configuration is authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfiguration {
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub source_config: serde_json::Map<String, serde_json::Value>,
    pub target_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub target_config: serde_json::Map<String, serde_json::Value>,
    pub smt_name: String,
    /// Ordered transform steps
    #[serde(deserialize_with = "null_as_default")]
    pub smt_config: Vec<serde_json::Value>,
    pub draft_step: String,
}

/// A pipeline as returned by `/pipelines/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub state: PipelineState,
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub json_configuration: Option<PipelineConfiguration>,
}
