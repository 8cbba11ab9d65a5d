//! Tri-state attribute values

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire representation of a value that is only known after apply
///
/// This is the sentinel Terraform's legacy SDK used for unknown values.
pub const UNKNOWN_VALUE: &str = "74D93920-ED26-11E3-AC10-0800200C9A66";

/// An attribute value as Terraform sees it: absent, not yet known, or known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    Null,
    Unknown,
    Known(T),
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Null
    }
}

impl<T> Value<T> {
    pub fn known(value: impl Into<T>) -> Self {
        Value::Known(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Value::Known)
    }
}

impl Value<String> {
    /// The known string, or `""` for null and unknown values
    pub fn value_string(&self) -> String {
        self.as_known().cloned().unwrap_or_default()
    }

    /// The known string when it is not empty
    pub fn non_empty(&self) -> Option<&str> {
        self.as_known().map(String::as_str).filter(|s| !s.is_empty())
    }
}

impl Value<bool> {
    /// The known flag, or `false` for null and unknown values
    pub fn value_bool(&self) -> bool {
        matches!(self, Value::Known(true))
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Unknown => serializer.serialize_str(UNKNOWN_VALUE),
            Value::Known(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::String(s) if s == UNKNOWN_VALUE => Ok(Value::Unknown),
            raw => T::deserialize(raw).map(Value::Known).map_err(D::Error::custom),
        }
    }
}

/// Whether a raw JSON attribute value is the unknown sentinel
pub fn is_unknown_json(value: &serde_json::Value) -> bool {
    value.as_str() == Some(UNKNOWN_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_wire_format() {
        assert_eq!(serde_json::to_value(Value::<String>::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(Value::<bool>::Unknown).unwrap(),
            json!(UNKNOWN_VALUE)
        );
        assert_eq!(serde_json::to_value(Value::Known(true)).unwrap(), json!(true));
    }

    #[test]
    fn test_value_parse() {
        let unknown: Value<bool> = serde_json::from_value(json!(UNKNOWN_VALUE)).unwrap();
        assert!(unknown.is_unknown());

        let name: Value<String> = serde_json::from_value(json!("prod")).unwrap();
        assert_eq!(name, Value::known("prod"));

        let wrong: Result<Value<bool>, _> = serde_json::from_value(json!("yes"));
        assert!(wrong.is_err());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::<String>::Unknown.value_string(), "");
        assert_eq!(Value::<String>::known("").non_empty(), None);
        assert!(!Value::<bool>::Null.value_bool());
        assert_eq!(Value::from(Some(3)), Value::Known(3));
        assert!(Value::<u8>::from(None).is_null());
    }
}
