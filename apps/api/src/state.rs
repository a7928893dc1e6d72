use std::sync::Arc;

use crate::config::Config;
use crate::flows::FlowOptions;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-submission data; every submission gets its own session.
#[derive(Clone)]
pub struct AppState {
    /// Production: `LlmClient`. Tests: `StubModelClient`.
    pub model: Arc<dyn ModelClient>,
    pub config: Config,
    pub flow_options: FlowOptions,
}

impl AppState {
    pub fn new(model: Arc<dyn ModelClient>, config: Config) -> Self {
        let flow_options = config.flow_options();
        Self {
            model,
            config,
            flow_options,
        }
    }
}
