//! Plan computation
//!
//! Turns a proposed configuration and the prior tracked state into the
//! planned state the host later asks the provider to apply.

use super::diagnostics::Diagnostics;
use super::schema::Schema;
use super::value::UNKNOWN_VALUE;
use serde::Serialize;
use serde_json::{Map, Value as Json};

/// What applying a plan will do to the remote resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    Create,
    Update,
    Delete,
    NoOp,
}

/// Result of planning one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedChange {
    pub action: PlanAction,
    pub planned_state: Json,
}

impl PlannedChange {
    pub fn requires_update(&self) -> bool {
        self.action == PlanAction::Update
    }
}

/// Plan one resource
///
/// - a null proposal deletes the resource;
/// - null optional attributes with a static default take the default;
/// - null computed attributes keep their prior value when nothing
///   configurable changed (or the attribute uses state for unknown), and
///   are otherwise planned as unknown.
pub fn plan_resource_change(
    schema: &Schema,
    prior_state: &Json,
    proposed: &Json,
) -> Result<PlannedChange, Diagnostics> {
    if proposed.is_null() {
        let action = if prior_state.is_null() {
            PlanAction::NoOp
        } else {
            PlanAction::Delete
        };
        return Ok(PlannedChange {
            action,
            planned_state: Json::Null,
        });
    }

    let Some(proposed) = proposed.as_object() else {
        return Err(Diagnostics::from(super::Diagnostic::error(
            "Invalid Plan",
            format!("Expected the proposed state to be an object, got: {}", proposed),
        )));
    };
    let prior = prior_state.as_object();

    let mut planned = Map::new();
    for (name, attribute) in &schema.attributes {
        let value = proposed.get(name).cloned().unwrap_or(Json::Null);
        let value = match (&attribute.default, value) {
            (Some(default), Json::Null) if attribute.is_configurable() => default.clone(),
            (_, value) => value,
        };
        planned.insert(name.clone(), value);
    }

    let changed = match prior {
        None => true,
        Some(prior) => schema
            .attributes
            .iter()
            .filter(|(_, attribute)| attribute.is_configurable())
            .any(|(name, _)| {
                planned.get(name).unwrap_or(&Json::Null) != prior.get(name).unwrap_or(&Json::Null)
            }),
    };

    for (name, attribute) in &schema.attributes {
        let is_null = planned.get(name).is_none_or(Json::is_null);
        if !attribute.computed || !is_null {
            continue;
        }

        let prior_value = prior.and_then(|p| p.get(name)).filter(|v| !v.is_null());
        let value = match prior_value {
            Some(v) if !changed || attribute.use_state_for_unknown => v.clone(),
            _ => Json::String(UNKNOWN_VALUE.to_string()),
        };
        planned.insert(name.clone(), value);
    }

    let action = match (prior, changed) {
        (None, _) => PlanAction::Create,
        (Some(_), true) => PlanAction::Update,
        (Some(_), false) => PlanAction::NoOp,
    };

    Ok(PlannedChange {
        action,
        planned_state: Json::Object(planned),
    })
}
