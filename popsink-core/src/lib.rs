//! Popsink Core
//!
//! Wire types shared by the Popsink API client and the Terraform provider.
//!
//! This crate contains:
//! - Domain types: records returned by the API (Env, Team, Pipeline)
//! - DTOs: create and update payloads sent to the API

pub mod domain;
pub mod dto;
mod serde_util;
