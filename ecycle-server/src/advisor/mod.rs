//! Advisory gateway for the repair chatbot.
//!
//! Forwards a free-text device-repair question to an external
//! chat-completion API. Each question is one best-effort call: no
//! retry, no backoff, no streaming. A missing credential and any call
//! failure degrade to localized messages instead of errors.

mod client;
mod error;
mod gateway;
mod types;

pub use client::{ChatClient, ChatConfig};
pub use error::AdvisorError;
pub use gateway::{RepairAdvisor, SYSTEM_PROMPT, UNCONFIGURED_MESSAGE};
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, ChatUsage};
