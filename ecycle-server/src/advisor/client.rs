//! Chat-completion HTTP client.
//!
//! Thin client over an OpenAI-style `/chat/completions` endpoint.
//! Handles authentication and status mapping; each call is a single
//! best-effort request.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use super::error::AdvisorError;
use super::types::{ChatMessage, ChatRequest, ChatResponse};

/// Default base URL for the completion API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used for repair consultations.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Upper bound on generated tokens per reply.
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature for replies.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for the chat client.
///
/// The model, token bound, and temperature are fixed product constants;
/// the builder methods exist so tests can point the client elsewhere.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to the production endpoint)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Maximum generated tokens per reply
    pub max_output_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ChatConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the generated-token bound.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Chat-completion API client.
///
/// Each call is a single synchronous exchange from the caller's
/// perspective: no retry, no backoff, no streaming or partial results.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl ChatClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the API key cannot form a valid header or the HTTP
    /// client cannot be built.
    pub fn new(config: ChatConfig) -> Result<Self, AdvisorError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            AdvisorError::Api {
                status: 0,
                message: "invalid API key format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            model: config.model,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }

    /// Build the request body for a conversation.
    fn request_body(&self, messages: Vec<ChatMessage>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
        }
    }

    /// Generate a completion for the conversation and return the first
    /// choice's text verbatim.
    ///
    /// # Errors
    ///
    /// Maps 401 to [`AdvisorError::Unauthorized`], 429 to
    /// [`AdvisorError::RateLimited`], other non-success statuses to
    /// [`AdvisorError::Api`], unparseable bodies to
    /// [`AdvisorError::Json`], and a choice-less response to
    /// [`AdvisorError::EmptyResponse`].
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&self.request_body(messages))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdvisorError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AdvisorError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AdvisorError::Json {
                message: e.to_string(),
            })?;

        first_message_text(parsed)
    }
}

/// Pull the first generated message out of a parsed response.
fn first_message_text(response: ChatResponse) -> Result<String, AdvisorError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(AdvisorError::EmptyResponse)
}
