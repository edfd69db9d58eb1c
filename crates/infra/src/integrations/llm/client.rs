/// Chat Completions client for project advice
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Method, RequestBuilder};
use resplan_core::AdviceProvider;
use resplan_domain::{AdviceConfig, AdviceProviderKind, ResplanError};
use tracing::{debug, info};

use super::types::{
    AdviceError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorEnvelope,
};
use crate::http::HttpClient;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
const MAX_TOKENS: u32 = 1_500;
const TEMPERATURE: f32 = 0.7;
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
const NO_RESPONSE: &str = "No response";

/// Where and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    OpenAi { url: String, model: String },
    Azure { url: String },
}

/// LLM client that turns an advice prompt into advice text
pub struct LlmAdviceClient {
    http_client: HttpClient,
    api_key: String,
    target: Target,
}

impl LlmAdviceClient {
    /// Create a client for the configured provider
    ///
    /// # Errors
    /// Returns `AdviceError::Config` when Azure is selected without an
    /// endpoint or deployment.
    pub fn new(config: &AdviceConfig, http_client: HttpClient) -> Result<Self, AdviceError> {
        let target = match config.provider {
            AdviceProviderKind::OpenAi => {
                let base = config.endpoint.as_deref().unwrap_or(OPENAI_BASE_URL);
                Target::OpenAi {
                    url: format!("{}/chat/completions", base.trim_end_matches('/')),
                    model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                }
            }
            AdviceProviderKind::Azure => {
                let (Some(endpoint), Some(deployment)) =
                    (config.endpoint.as_deref(), config.azure_deployment.as_deref())
                else {
                    return Err(AdviceError::Config(
                        "Azure OpenAI requires endpoint and deployment name".into(),
                    ));
                };
                let version =
                    config.azure_api_version.as_deref().unwrap_or(DEFAULT_AZURE_API_VERSION);
                Target::Azure {
                    url: format!(
                        "{}/openai/deployments/{deployment}/chat/completions?api-version={version}",
                        endpoint.trim_end_matches('/')
                    ),
                }
            }
        };

        Ok(Self { http_client, api_key: config.api_key.clone(), target })
    }

    /// Request URL for the configured provider
    #[must_use]
    pub fn url(&self) -> &str {
        match &self.target {
            Target::OpenAi { url, .. } | Target::Azure { url } => url,
        }
    }

    /// Ask for advice on `prompt`
    ///
    /// # Errors
    /// Returns `AdviceError` for network failures, API errors, or invalid
    /// responses.
    pub async fn request_advice(&self, prompt: &str) -> Result<String, AdviceError> {
        let payload = ChatCompletionRequest {
            model: match &self.target {
                Target::OpenAi { model, .. } => Some(model.as_str()),
                Target::Azure { .. } => None,
            },
            messages: vec![ChatMessage { role: "user", content: prompt }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let request =
            self.authorize(self.http_client.request(Method::POST, self.url())).json(&payload);

        let response = self.http_client.send(request).await.map_err(|err| match err {
            ResplanError::Network(msg) | ResplanError::Internal(msg) => AdviceError::Network(msg),
            other => AdviceError::Network(format!("HTTP error: {other}")),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received advice API response");

        if !status.is_success() {
            return Err(handle_error_status(status.as_u16(), response).await);
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AdviceError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        let advice = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        info!(chars = advice.chars().count(), "Advice response received");
        Ok(advice)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.target {
            Target::OpenAi { .. } => builder.bearer_auth(&self.api_key),
            Target::Azure { .. } => builder.header("api-key", &self.api_key),
        }
    }
}

#[async_trait]
impl AdviceProvider for LlmAdviceClient {
    async fn advise(&self, prompt: &str) -> resplan_domain::Result<String> {
        self.request_advice(prompt).await.map_err(ResplanError::from)
    }
}

// The API key stays out of logs.
impl std::fmt::Debug for LlmAdviceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmAdviceClient").field("target", &self.target).finish_non_exhaustive()
    }
}

/// Map an error status to `AdviceError`, preferring the provider's message
async fn handle_error_status(status: u16, response: reqwest::Response) -> AdviceError {
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("API error: {status}"));

    match status {
        401 | 403 => AdviceError::Authentication(format!("{message} ({status})")),
        429 => AdviceError::RateLimit(retry_after),
        _ => AdviceError::Api { status, message },
    }
}
