//! Chat Completions wire types and the advice client's error type

use resplan_domain::ResplanError;
use serde::{Deserialize, Serialize};

/// LLM advice error types
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    /// Network-level error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded (retry after {0}s)")]
    RateLimit(u64),

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Response body doesn't match the expected schema
    #[error("Invalid response schema: {0}")]
    InvalidSchema(String),

    /// Settings are incomplete for the selected provider
    #[error("Misconfigured advice provider: {0}")]
    Config(String),
}

impl From<AdviceError> for ResplanError {
    fn from(value: AdviceError) -> Self {
        match value {
            AdviceError::Authentication(_) => Self::Auth(value.to_string()),
            AdviceError::Config(_) => Self::Config(value.to_string()),
            AdviceError::InvalidSchema(_) => Self::Internal(value.to_string()),
            AdviceError::Api { status, .. } if (400..500).contains(&status) => {
                Self::InvalidInput(value.to_string())
            }
            AdviceError::Network(_) | AdviceError::RateLimit(_) | AdviceError::Api { .. } => {
                Self::Network(value.to_string())
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    /// Azure takes the model from the deployment in the URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub content: Option<String>,
}

/// `{"error": {"message": "..."}}` as returned by both providers
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_request_without_model_for_azure() {
        let request = ChatCompletionRequest {
            model: None,
            messages: vec![ChatMessage { role: "user", content: "hi" }],
            max_tokens: 1500,
            temperature: 0.7,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("model").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_tokens"], 1500);
    }

    #[test]
    fn deserializes_null_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn maps_into_domain_errors() {
        let auth: ResplanError = AdviceError::Authentication("401".into()).into();
        assert!(matches!(auth, ResplanError::Auth(_)));

        let limited: ResplanError = AdviceError::RateLimit(30).into();
        assert!(matches!(limited, ResplanError::Network(msg) if msg.contains("30s")));

        let bad_request: ResplanError =
            AdviceError::Api { status: 400, message: "bad".into() }.into();
        assert!(matches!(bad_request, ResplanError::InvalidInput(_)));

        let outage: ResplanError = AdviceError::Api { status: 503, message: "down".into() }.into();
        assert!(matches!(outage, ResplanError::Network(_)));
    }
}
