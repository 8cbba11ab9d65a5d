//! Resource and provider schemas

use super::diagnostics::Diagnostics;
use super::value::is_unknown_json;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
}

impl AttributeType {
    fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
        }
    }
}

/// Validation of a known string attribute value
pub trait StringValidator: Send + Sync {
    fn description(&self) -> String;

    /// Report problems with `value` as diagnostics on `attribute`
    fn validate(&self, attribute: &str, value: &str, diagnostics: &mut Diagnostics);
}

impl fmt::Debug for dyn StringValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// One attribute of a schema
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Keep the prior state value instead of planning an unknown
    #[serde(skip)]
    pub use_state_for_unknown: bool,
    #[serde(skip)]
    pub validators: Vec<Arc<dyn StringValidator>>,
}

impl Attribute {
    fn new(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            default: None,
            use_state_for_unknown: false,
            validators: Vec::new(),
        }
    }

    pub fn required_string(description: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn optional_string(description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn computed_string(description: impl Into<String>) -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::String, description)
        }
    }

    pub fn optional_bool(description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::Bool, description)
        }
    }

    #[must_use]
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Static value planned when the configuration leaves the attribute null
    #[must_use]
    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl StringValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Whether users may set this attribute in configuration
    pub fn is_configurable(&self) -> bool {
        self.required || self.optional
    }
}

/// Attributes of a provider or resource, keyed by name
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// An object with every attribute set to null
    pub fn null_object(&self) -> serde_json::Map<String, serde_json::Value> {
        self.attributes
            .keys()
            .map(|name| (name.clone(), serde_json::Value::Null))
            .collect()
    }

    /// Check a configuration object against the schema
    ///
    /// Unknown values pass every check; they are validated once known.
    pub fn validate_config(&self, config: &serde_json::Value) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();

        let Some(object) = config.as_object() else {
            diagnostics.add_error(
                "Invalid Configuration",
                format!("Expected a configuration object, got: {}", config),
            );
            return diagnostics;
        };

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diagnostics.add_attribute_error(
                    name.clone(),
                    "Unsupported Attribute",
                    format!("An attribute named \"{}\" is not expected here.", name),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = object.get(name).unwrap_or(&serde_json::Value::Null);

            if is_unknown_json(value) {
                continue;
            }

            if value.is_null() {
                if attribute.required {
                    diagnostics.add_attribute_error(
                        name.clone(),
                        "Missing Required Attribute",
                        format!(
                            "The argument \"{}\" is required, but no definition was found.",
                            name
                        ),
                    );
                }
                continue;
            }

            if !attribute.is_configurable() {
                diagnostics.add_attribute_error(
                    name.clone(),
                    "Invalid Configuration for Read-Only Attribute",
                    format!(
                        "Cannot set value for attribute \"{}\": it is computed by the provider.",
                        name
                    ),
                );
                continue;
            }

            if !attribute.kind.matches(value) {
                diagnostics.add_attribute_error(
                    name.clone(),
                    "Incorrect Attribute Type",
                    format!(
                        "Expected a {:?} value for \"{}\", got: {}",
                        attribute.kind, name, value
                    ),
                );
                continue;
            }

            if let Some(text) = value.as_str() {
                for validator in &attribute.validators {
                    validator.validate(name, text, &mut diagnostics);
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::validators::one_of;
    use crate::framework::value::UNKNOWN_VALUE;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new("test")
            .with_attribute("id", Attribute::computed_string("id").use_state_for_unknown())
            .with_attribute("name", Attribute::required_string("name"))
            .with_attribute(
                "state",
                Attribute::optional_string("state").with_validator(one_of(["draft", "live"])),
            )
            .with_attribute(
                "enabled",
                Attribute::optional_bool("enabled").computed().with_default(json!(false)),
            )
    }

    #[test]
    fn test_valid_config() {
        let diags =
            schema().validate_config(&json!({"name": "a", "state": "live", "enabled": true}));
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn test_missing_required_attribute() {
        let diags = schema().validate_config(&json!({"state": "draft"}));
        let errors: Vec<_> = diags.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].summary, "Missing Required Attribute");
        assert_eq!(errors[0].attribute.as_deref(), Some("name"));
    }

    #[test]
    fn test_rejects_computed_unsupported_and_mistyped() {
        let diags = schema().validate_config(&json!({
            "id": "x",
            "name": "a",
            "enabled": "yes",
            "colour": "blue"
        }));
        let summaries: Vec<_> = diags.errors().map(|d| d.summary.as_str()).collect();
        assert!(summaries.contains(&"Unsupported Attribute"));
        assert!(summaries.contains(&"Invalid Configuration for Read-Only Attribute"));
        assert!(summaries.contains(&"Incorrect Attribute Type"));
    }

    #[test]
    fn test_unknown_values_are_skipped() {
        let diags =
            schema().validate_config(&json!({"name": UNKNOWN_VALUE, "state": UNKNOWN_VALUE}));
        assert!(!diags.has_error());
    }

    #[test]
    fn test_validators_run_on_known_strings() {
        let diags = schema().validate_config(&json!({"name": "a", "state": "running"}));
        assert!(diags.has_error());
    }

    #[test]
    fn test_schema_serializes_without_internal_fields() {
        let value = serde_json::to_value(schema()).unwrap();
        let enabled = &value["attributes"]["enabled"];
        assert_eq!(enabled["type"], json!("bool"));
        assert_eq!(enabled["default"], json!(false));
        assert!(enabled.get("validators").is_none());
        assert!(value["attributes"]["id"].get("use_state_for_unknown").is_none());
    }
}
