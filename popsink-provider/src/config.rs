//! Provider configuration
//!
//! The API endpoint and token come from the provider block, falling back to
//! environment variables:
//! - POPSINK_BASE_URL
//! - POPSINK_TOKEN
//!
//! Explicit configuration wins over the environment.

use crate::framework::{Attribute, Diagnostics, Schema, Value};
use serde::Deserialize;
use std::fmt;

pub const BASE_URL_ENV: &str = "POPSINK_BASE_URL";
pub const TOKEN_ENV: &str = "POPSINK_TOKEN";

/// The provider block as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderModel {
    #[serde(default)]
    pub base_url: Value<String>,
    #[serde(default)]
    pub token: Value<String>,
}

/// Provider-level schema
pub fn provider_schema() -> Schema {
    Schema::new("Interact with Popsink API to manage data pipelines.")
        .with_attribute(
            "base_url",
            Attribute::optional_string(format!(
                "The base URL for the Popsink API. May also be provided via {} environment variable.",
                BASE_URL_ENV
            )),
        )
        .with_attribute(
            "token",
            Attribute::optional_string(format!(
                "The API token for authenticating with the Popsink API. May also be provided via {} environment variable.",
                TOKEN_ENV
            ))
            .sensitive(),
        )
}

/// Resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub token: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve settings from the provider block and the process environment
    pub fn resolve(model: &ProviderModel) -> Result<Self, Diagnostics> {
        Self::resolve_with(model, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `lookup` for environment variables
    pub fn resolve_with(
        model: &ProviderModel,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Diagnostics> {
        let base_url = model
            .base_url
            .as_known()
            .cloned()
            .or_else(|| lookup(BASE_URL_ENV))
            .unwrap_or_default();
        let token = model
            .token
            .as_known()
            .cloned()
            .or_else(|| lookup(TOKEN_ENV))
            .unwrap_or_default();

        let mut diagnostics = Diagnostics::new();

        if base_url.is_empty() {
            diagnostics.add_attribute_error(
                "base_url",
                "Missing Base URL",
                format!(
                    "The provider cannot create the Popsink API client as there is a missing or empty value for the base URL. \
                     Set the base_url value in the configuration or use the {} environment variable. \
                     If either is already set, ensure the value is not empty.",
                    BASE_URL_ENV
                ),
            );
        }

        if token.is_empty() {
            diagnostics.add_attribute_error(
                "token",
                "Missing API Token",
                format!(
                    "The provider cannot create the Popsink API client as there is a missing or empty value for the API token. \
                     Set the token value in the configuration or use the {} environment variable. \
                     If either is already set, ensure the value is not empty.",
                    TOKEN_ENV
                ),
            );
        }

        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        Ok(Self { base_url, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(base_url: Option<&str>, token: Option<&str>) -> ProviderModel {
        ProviderModel {
            base_url: base_url.map(str::to_string).into(),
            token: token.map(str::to_string).into(),
        }
    }

    #[test]
    fn test_explicit_values_win_over_environment() {
        temp_env::with_vars(
            [(BASE_URL_ENV, Some("https://env.example.com")), (TOKEN_ENV, Some("env-token"))],
            || {
                let config =
                    ProviderConfig::resolve(&model(Some("https://cfg.example.com"), None)).unwrap();
                assert_eq!(config.base_url, "https://cfg.example.com");
                assert_eq!(config.token, "env-token");
            },
        );
    }

    #[test]
    fn test_environment_fallback() {
        temp_env::with_vars(
            [(BASE_URL_ENV, Some("https://env.example.com")), (TOKEN_ENV, Some("env-token"))],
            || {
                let config = ProviderConfig::resolve(&ProviderModel::default()).unwrap();
                assert_eq!(config.base_url, "https://env.example.com");
                assert_eq!(config.token, "env-token");
            },
        );
    }

    #[test]
    fn test_missing_values_are_attribute_errors() {
        let diags = ProviderConfig::resolve_with(&ProviderModel::default(), |_| None).unwrap_err();
        let attributes: Vec<_> = diags.errors().filter_map(|d| d.attribute.as_deref()).collect();
        assert_eq!(attributes, vec!["base_url", "token"]);
    }

    #[test]
    fn test_empty_explicit_value_is_missing() {
        let diags = ProviderConfig::resolve_with(&model(Some(""), Some("t")), |_| {
            Some("https://ignored.example.com".to_string())
        })
        .unwrap_err();
        assert_eq!(diags.errors().next().unwrap().summary, "Missing Base URL");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig::resolve_with(
            &model(Some("https://a.example.com"), Some("s3cret")),
            |_| None,
        )
        .unwrap();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }
}
