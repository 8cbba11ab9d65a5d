//! Plan and state documents
//!
//! Both carry a resource object as JSON and convert to and from the typed
//! model each resource declares.

use super::diagnostics::Diagnostic;
use serde::Serialize;
use serde::de::DeserializeOwned;

fn decode<T: DeserializeOwned>(raw: &serde_json::Value, what: &str) -> Result<T, Diagnostic> {
    T::deserialize(raw).map_err(|e| {
        Diagnostic::error(
            format!("Invalid {}", what),
            format!("Could not decode {} into the resource model: {}", what, e),
        )
    })
}

/// The planned (desired) values for a resource
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    raw: serde_json::Value,
}

impl Plan {
    pub fn new(raw: serde_json::Value) -> Self {
        Self { raw }
    }

    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Diagnostic> {
        decode(&self.raw, "plan")
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// The tracked state of a resource
///
/// A state without an object means the resource is not (or no longer) tracked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    raw: Option<serde_json::Value>,
}

impl State {
    /// Wrap a state object; JSON `null` yields an empty state
    pub fn new(raw: serde_json::Value) -> Self {
        Self {
            raw: (!raw.is_null()).then_some(raw),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Diagnostic> {
        match &self.raw {
            Some(raw) => decode(raw, "state"),
            None => Err(Diagnostic::error(
                "Missing State",
                "The resource has no tracked state to read from.",
            )),
        }
    }

    pub fn set<T: Serialize>(&mut self, model: &T) -> Result<(), Diagnostic> {
        let raw = serde_json::to_value(model).map_err(|e| {
            Diagnostic::error("Invalid State", format!("Could not encode resource state: {}", e))
        })?;
        self.raw = Some(raw);
        Ok(())
    }

    /// Drop the resource from tracked state
    pub fn remove_resource(&mut self) {
        self.raw = None;
    }

    pub fn is_removed(&self) -> bool {
        self.raw.is_none()
    }

    pub fn raw(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }

    pub fn into_raw(self) -> serde_json::Value {
        self.raw.unwrap_or(serde_json::Value::Null)
    }
}
