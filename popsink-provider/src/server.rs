//! Host protocol server
//!
//! Line-delimited JSON over a reader/writer pair: one request object per
//! line in, one response object per line out. Requests are handled one at a
//! time, in order.

use crate::framework::{Diagnostic, Diagnostics};
use crate::provider::{DiagnosticsResponse, PopsinkProvider};
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value as Json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// A host request, tagged by `method`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Request {
    GetProviderSchema,
    ConfigureProvider {
        #[serde(default)]
        config: Json,
    },
    ValidateResourceConfig {
        type_name: String,
        #[serde(default)]
        config: Json,
    },
    PlanResourceChange {
        type_name: String,
        #[serde(default)]
        prior_state: Json,
        #[serde(default)]
        proposed_new_state: Json,
    },
    ApplyResourceChange {
        type_name: String,
        #[serde(default)]
        prior_state: Json,
        #[serde(default)]
        planned_state: Json,
    },
    ReadResource {
        type_name: String,
        #[serde(default)]
        current_state: Json,
    },
    ImportResourceState {
        type_name: String,
        id: String,
    },
    StopProvider,
}

impl Request {
    pub fn method(&self) -> &'static str {
        match self {
            Request::GetProviderSchema => "get_provider_schema",
            Request::ConfigureProvider { .. } => "configure_provider",
            Request::ValidateResourceConfig { .. } => "validate_resource_config",
            Request::PlanResourceChange { .. } => "plan_resource_change",
            Request::ApplyResourceChange { .. } => "apply_resource_change",
            Request::ReadResource { .. } => "read_resource",
            Request::ImportResourceState { .. } => "import_resource_state",
            Request::StopProvider => "stop_provider",
        }
    }
}

/// Run one request against the provider and encode its response
pub async fn dispatch(provider: &PopsinkProvider, request: Request) -> serde_json::Result<Json> {
    match request {
        Request::GetProviderSchema => serde_json::to_value(provider.get_provider_schema()),
        Request::ConfigureProvider { config } => serde_json::to_value(provider.configure(&config)),
        Request::ValidateResourceConfig { type_name, config } => {
            serde_json::to_value(provider.validate_resource_config(&type_name, &config))
        }
        Request::PlanResourceChange {
            type_name,
            prior_state,
            proposed_new_state,
        } => serde_json::to_value(provider.plan_resource_change(
            &type_name,
            &prior_state,
            &proposed_new_state,
        )),
        Request::ApplyResourceChange {
            type_name,
            prior_state,
            planned_state,
        } => serde_json::to_value(
            provider
                .apply_resource_change(&type_name, prior_state, planned_state)
                .await,
        ),
        Request::ReadResource {
            type_name,
            current_state,
        } => serde_json::to_value(provider.read_resource(&type_name, current_state).await),
        Request::ImportResourceState { type_name, id } => {
            serde_json::to_value(provider.import_resource_state(&type_name, &id).await)
        }
        Request::StopProvider => serde_json::to_value(DiagnosticsResponse::default()),
    }
}

/// Serve requests until the reader is exhausted or the host asks to stop
///
/// # Arguments
/// * `provider` - The provider answering requests
/// * `reader` - Source of request lines
/// * `writer` - Sink for response lines
///
/// # Errors
/// Only I/O failures on the reader or writer end the loop with an error.
/// Malformed requests are answered with an error diagnostic.
pub async fn serve<R, W>(provider: &PopsinkProvider, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("failed to read request")? {
        if line.trim().is_empty() {
            continue;
        }

        let (response, stop) = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                debug!(method = request.method(), "Handling request");
                let stop = request == Request::StopProvider;
                let response = dispatch(provider, request)
                    .await
                    .context("failed to encode response")?;
                (response, stop)
            }
            Err(e) => {
                warn!(error = %e, "Malformed request");
                let response = DiagnosticsResponse {
                    diagnostics: Diagnostics::from(Diagnostic::error(
                        "Malformed Request",
                        format!("Could not decode request: {}", e),
                    )),
                };
                (serde_json::to_value(response).context("failed to encode response")?, false)
            }
        };

        let mut payload = serde_json::to_vec(&response).context("failed to encode response")?;
        payload.push(b'\n');
        writer.write_all(&payload).await.context("failed to write response")?;
        writer.flush().await.context("failed to write response")?;

        if stop {
            info!("Stop requested, shutting down");
            break;
        }
    }

    Ok(())
}
