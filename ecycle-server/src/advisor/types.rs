//! Wire types for the chat-completion API.
//!
//! Mirrors the request/response contract of an OpenAI-style
//! `/chat/completions` endpoint. Only the first choice's text is
//! consumed; usage metadata is parsed but not acted on.

use serde::{Deserialize, Serialize};

/// One message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant".
    pub role: String,

    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Ordered conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Upper bound on generated tokens.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,
}

/// One generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response body from the completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated choices; the first one is the reply.
    pub choices: Vec<ChatChoice>,

    /// Usage metadata, when the API reports it.
    pub usage: Option<ChatUsage>,
}
