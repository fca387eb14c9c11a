//! Analysis Client: the seam between the pipeline and the remote model.
//!
//! `AppState` holds an `Arc<dyn AnalysisClient>`. Production uses `LlmClient`;
//! tests swap in a stub without touching handlers.

use async_trait::async_trait;

use crate::analysis::request::AnalysisRequest;
use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Sends the request and returns the raw response text. Exactly one
    /// outbound call per invocation, apart from configured retries.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, LlmError>;

    /// Model identifier, for logs and the JSON response.
    fn model(&self) -> &str;
}

#[async_trait]
impl AnalysisClient for LlmClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String, LlmError> {
        self.call_text(request.prompt(), request.system()).await
    }

    fn model(&self) -> &str {
        LlmClient::model(self)
    }
}
