use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::models::{ChatRequest, ChatStream, LLMError};

/// Chat completion backend
///
/// Errors returned from the call itself happen before any output exists
/// (connection, HTTP status). Errors after that arrive as stream items.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Open a streaming completion. The returned stream stops pulling from
    /// the upstream connection once `cancel` fires.
    async fn stream_chat(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<ChatStream, LLMError>;

    /// Run a non-streaming completion and return the message text.
    async fn complete_chat(&self, request: ChatRequest) -> Result<String, LLMError>;
}
