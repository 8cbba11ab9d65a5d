//! Data Transfer Objects sent to the Popsink API
//!
//! Create payloads carry every field the API requires. Update payloads carry
//! only the fields that changed; unset fields are left out of the JSON body.

pub mod env;
pub mod pipeline;
pub mod team;
