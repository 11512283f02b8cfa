use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::RemoteGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Remote generation backend. `AzureOpenAiClient` when configured, `DisabledRemote`
    /// otherwise; tests inject stubs.
    pub remote: Arc<dyn RemoteGenerator>,
    pub config: Config,
}
