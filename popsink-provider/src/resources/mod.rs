//! Resource handlers
//!
//! One handler per Popsink object type. Each maps Terraform's plan and state
//! onto the matching client calls.

mod env;
mod pipeline;
mod team;

pub use env::{EnvModel, EnvResource};
pub use pipeline::{ConnectorTypeValidator, PipelineModel, PipelineResource};
pub use team::{TeamModel, TeamResource};

use crate::framework::Diagnostic;
use popsink_client::PopsinkClient;
use std::sync::{Arc, RwLock};

/// The API client shared by the provider and its resources
///
/// Empty until the provider is configured.
#[derive(Debug, Clone, Default)]
pub struct ClientSlot {
    inner: Arc<RwLock<Option<PopsinkClient>>>,
}

impl ClientSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, client: PopsinkClient) {
        let mut slot = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(client);
    }

    /// The configured client, or an error diagnostic before configuration
    pub fn get(&self) -> Result<PopsinkClient, Diagnostic> {
        let slot = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.clone().ok_or_else(|| {
            Diagnostic::error(
                "Unconfigured Provider",
                "The Popsink provider has not been configured yet. \
                 Please report this issue to the provider developers.",
            )
        })
    }
}
