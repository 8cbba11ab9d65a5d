//! Environment domain types

use serde::{Deserialize, Serialize};

/// Free-form retention settings attached to an environment
///
/// The API treats this as an opaque broker configuration object.
pub type BrokerConfiguration = serde_json::Map<String, serde_json::Value>;

/// An environment as returned by `/envs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Env {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub use_retention: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_configuration: Option<BrokerConfiguration>,
}

/// Drop entries that carry no meaningful value (`null` or an empty string)
///
/// The API echoes every known broker key, most of them empty; only the keys a
/// user could have written are kept.
pub fn normalize_retention_config(config: &BrokerConfiguration) -> BrokerConfiguration {
    config
        .iter()
        .filter(|(_, value)| !value.is_null() && value.as_str() != Some(""))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_drops_null_and_empty_values() {
        let config = json!({
            "retention_ms": 3600000,
            "cleanup_policy": "",
            "segment_bytes": null,
            "compression": "gzip",
            "enabled": false
        });
        let config = config.as_object().unwrap().clone();

        let normalized = normalize_retention_config(&config);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized["retention_ms"], json!(3600000));
        assert_eq!(normalized["compression"], json!("gzip"));
        assert_eq!(normalized["enabled"], json!(false));
        assert!(!normalized.contains_key("cleanup_policy"));
    }

    #[test]
    fn test_env_without_retention_configuration() {
        let env: Env = serde_json::from_str(r#"{"id":"env-1","name":"prod"}"#).unwrap();
        assert_eq!(env.id, "env-1");
        assert!(!env.use_retention);
        assert!(env.retention_configuration.is_none());
    }
}
