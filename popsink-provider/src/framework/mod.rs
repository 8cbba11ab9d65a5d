//! Plugin framework seam
//!
//! The pieces of Terraform's resource model the provider needs: tri-state
//! attribute values, diagnostics, plan and state documents, schemas with
//! validators, plan computation and the [`Resource`] trait every resource
//! handler implements.

pub mod diagnostics;
pub mod document;
pub mod plan;
pub mod resource;
pub mod schema;
pub mod validators;
pub mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use document::{Plan, State};
pub use plan::{PlanAction, PlannedChange, plan_resource_change};
pub use resource::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, ImportStateRequest,
    ImportStateResponse, ReadRequest, ReadResponse, Resource, UpdateRequest, UpdateResponse,
};
pub use schema::{Attribute, AttributeType, Schema, StringValidator};
pub use value::{UNKNOWN_VALUE, Value};
