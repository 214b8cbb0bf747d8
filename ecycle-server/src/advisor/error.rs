//! Advisory gateway error types.

/// Errors from the chat-completion client.
///
/// These never reach the end user directly: the gateway folds them into
/// a fixed-format localized reply.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or unauthorized
    #[error("unauthorized: check OPENAI_API_KEY")]
    Unauthorized,

    /// Rate limited by the completion API
    #[error("rate limited by the completion API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response contained no generated message
    #[error("response contained no choices")]
    EmptyResponse,
}
