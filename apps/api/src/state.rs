use std::sync::Arc;

use crate::analysis::client::AnalysisClient;
use crate::analysis::prompts::{PromptProfile, ResponseSchema};

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; each request owns its own documents and results.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model client. Default: `LlmClient`. Tests inject a stub.
    pub client: Arc<dyn AnalysisClient>,
    pub profile: PromptProfile,
    /// Key names shared by the prompt builder and the response parser.
    pub schema: ResponseSchema,
    pub max_upload_bytes: usize,
}
