//! Core domain types
//!
//! Records as the Popsink API returns them. The provider copies these into
//! tracked state after every create, read and update.

pub mod env;
pub mod pipeline;
pub mod team;
