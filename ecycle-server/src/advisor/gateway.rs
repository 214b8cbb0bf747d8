//! Repair consultation gateway.
//!
//! Total interface over the chat client: every outcome, including a
//! missing credential and any call failure, is a returned string.
//! Callers never see an error.

use super::client::{ChatClient, ChatConfig};
use super::error::AdvisorError;
use super::types::ChatMessage;

/// Policy preamble sent as the system message on every consultation.
pub const SYSTEM_PROMPT: &str = "You are an expert electronic device repair advisor. Please respond politely and professionally.\n\n\
Role and Response Rules:\n\
1. Assess repairability of electronic devices and provide solutions\n\
2. If repairable: Provide step-by-step repair instructions\n\
3. If unrepairable: Provide proper disposal procedures according to local regulations (likely South Korea)\n\
4. Even for highly repairable devices, offer to explain disposal procedures\n\
5. For off-topic queries: Explain your purpose and request appropriate questions\n\
6. End all responses with an offer to help with future queries\n\n\
Response Format:\n- Start with a list of possible solutions\n- Include disposal procedures if needed\n- End with offer for additional assistance";

/// Returned when no API credential is configured. A normal value, not
/// an error: the service is simply unavailable.
pub const UNCONFIGURED_MESSAGE: &str =
    "❗ OpenAI API 키가 설정되지 않았습니다. 관리자에게 문의해 주세요. (환경 변수: OPENAI_API_KEY)";

/// Gateway for repair-advice consultations.
///
/// Holds no state across calls beyond the HTTP client itself.
pub struct RepairAdvisor {
    client: Option<ChatClient>,
}

impl RepairAdvisor {
    /// Create an advisor. `None` (or an empty key) selects the degraded
    /// mode in which every query gets the unavailable-service message
    /// and the network is never touched.
    ///
    /// # Errors
    ///
    /// Fails only if a key is present but the HTTP client cannot be
    /// built from it.
    pub fn new(api_key: Option<String>) -> Result<Self, AdvisorError> {
        let client = match api_key {
            Some(key) if !key.is_empty() => Some(ChatClient::new(ChatConfig::new(key))?),
            _ => None,
        };

        Ok(Self { client })
    }

    /// Create an advisor over an already-configured client.
    pub fn with_client(client: ChatClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Whether a credential is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Answer a free-text repair question. The empty string is valid
    /// input and still issues a call.
    ///
    /// Never fails: a missing credential or a failed call degrades to a
    /// localized message.
    pub async fn advice(&self, query: &str) -> String {
        let Some(client) = &self.client else {
            return UNCONFIGURED_MESSAGE.to_string();
        };

        match client.complete(conversation(query)).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("repair consultation failed: {err}");
                failure_message(&err)
            }
        }
    }
}

/// Build the two-message conversation for a query: the fixed policy
/// preamble, then the user's literal text.
fn conversation(query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(query),
    ]
}

/// Fixed-format failure string shown in place of advice, inviting a
/// retry.
fn failure_message(err: &AdvisorError) -> String {
    format!("죄송합니다. 서비스 처리 중 오류가 발생했습니다: {err}\n다시 시도해 주시기 바랍니다.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_advisor_returns_the_fixed_message() {
        let advisor = RepairAdvisor::new(None).unwrap();
        assert!(!advisor.is_configured());
        assert_eq!(advisor.advice("노트북이 안 켜져요").await, UNCONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn empty_key_counts_as_unconfigured() {
        let advisor = RepairAdvisor::new(Some(String::new())).unwrap();
        assert!(!advisor.is_configured());
        assert_eq!(advisor.advice("").await, UNCONFIGURED_MESSAGE);
    }

    #[test]
    fn configured_advisor_reports_so() {
        let advisor = RepairAdvisor::new(Some("test-key".to_string())).unwrap();
        assert!(advisor.is_configured());
    }

    #[test]
    fn conversation_is_policy_then_literal_query() {
        let messages = conversation("스마트폰이 충전되지 않습니다");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "스마트폰이 충전되지 않습니다");
    }

    #[test]
    fn empty_query_still_builds_a_conversation() {
        let messages = conversation("");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "");
    }

    #[test]
    fn failure_message_embeds_the_detail_and_invites_retry() {
        let err = AdvisorError::Api {
            status: 500,
            message: "boom".into(),
        };
        let message = failure_message(&err);

        assert!(message.starts_with("죄송합니다. 서비스 처리 중 오류가 발생했습니다:"));
        assert!(message.contains("API error 500: boom"));
        assert!(message.ends_with("다시 시도해 주시기 바랍니다."));
    }
}
