pub mod ollama;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::models::chat::Role;

/// The shape that crosses the boundary to the inference server: role and
/// content only. Inbound relay bodies deserialize into this, so view-side
/// fields such as message ids are dropped before forwarding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the conversation for completion and returns the assistant text.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    fn model(&self) -> &str;
}
