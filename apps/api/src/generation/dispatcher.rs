//! Generation dispatcher: remote attempt first, local synthesis on any failure.
//!
//! One remote attempt, no retry. The local fallback is synchronous and total, so the
//! caller always gets a structurally valid entity plus a flag saying which path made it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::llm_client::{RemoteGenerationError, RemoteGenerator};

/// Response envelope for every generate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated<T> {
    pub data: T,
    /// True when `data` came from the local generator.
    pub used_fallback: bool,
}

/// What the remote backend is asked to produce.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    pub prompt: String,
    pub schema: Value,
    pub operation: &'static str,
}

/// Runs `request` against `remote`; on any error logs it and returns `fallback()` instead.
pub async fn dispatch<T, F>(
    remote: &dyn RemoteGenerator,
    request: RemoteRequest,
    fallback: F,
) -> Generated<T>
where
    T: DeserializeOwned + Send,
    F: FnOnce() -> T + Send,
{
    let generation_id = Uuid::new_v4();
    let span = info_span!("generation", operation = request.operation, %generation_id);

    async move {
        match attempt_remote::<T>(remote, &request).await {
            Ok(data) => {
                info!("Remote generation succeeded");
                Generated {
                    data,
                    used_fallback: false,
                }
            }
            Err(e) => {
                warn!("Remote generation failed, using local fallback: {e}");
                Generated {
                    data: fallback(),
                    used_fallback: true,
                }
            }
        }
    }
    .instrument(span)
    .await
}

/// A response that does not deserialize into `T` counts as a remote failure.
async fn attempt_remote<T: DeserializeOwned>(
    remote: &dyn RemoteGenerator,
    request: &RemoteRequest,
) -> Result<T, RemoteGenerationError> {
    let value = remote
        .generate(&request.prompt, &request.schema, request.operation)
        .await?;
    Ok(serde_json::from_value(value)?)
}
