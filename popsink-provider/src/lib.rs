//! Popsink Terraform provider
//!
//! Manages Popsink environments, teams and pipelines. The provider resolves
//! its API connection during configure, then maps plan and state onto
//! [`popsink_client::PopsinkClient`] calls for each resource type.

pub mod config;
pub mod framework;
pub mod provider;
pub mod resources;
pub mod server;

pub use provider::{PopsinkProvider, TYPE_NAME};
