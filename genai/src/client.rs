//! HTTP client for the generation endpoint.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use tracing::debug;
use tracing::warn;

use crate::config::API_KEY_ENV;
use crate::config::ClientConfig;
use crate::error::GenAiError;
use crate::error::Result;
use crate::types::GenerationRequest;
use crate::types::GenerationResponse;
use crate::types::WireMessage;
use crate::types::WireRequest;
use crate::types::WireResponse;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// The text generator API client.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(GenAiError::Configuration("API key is required".to_string()));
        }

        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a new client using the MIERU_GENAI_API_KEY environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            GenAiError::Configuration(format!("Missing {API_KEY_ENV} environment variable"))
        })?;

        Self::new(ClientConfig::new(api_key))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one generation request, retrying retryable failures with
    /// exponential backoff up to `max_retries`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let url = format!("{}{}", self.config.base_url, COMPLETIONS_PATH);
        let body = WireRequest {
            model: &self.config.model,
            messages: vec![WireMessage {
                role: "user",
                content: &request.instruction,
            }],
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 100ms, 200ms, 400ms, ...
                let delay = Duration::from_millis(100 * 2_u64.pow(attempt - 1));
                debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying generation call");
                tokio::time::sleep(delay).await;
            }

            match self.try_generate(&url, &body).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    warn!(attempt, error = %err, "generation call failed, will retry");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or(GenAiError::EmptyCompletion))
    }

    async fn try_generate(&self, url: &str, body: &WireRequest<'_>) -> Result<GenerationResponse> {
        let response = self
            .http_client
            .post(url)
            .headers(self.default_headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|err| GenAiError::Parse(err.to_string()))?;

        let text = wire
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenAiError::EmptyCompletion);
        }

        let usage = wire.usage;
        Ok(GenerationResponse {
            text,
            input_tokens: usage.as_ref().and_then(|u| u.prompt_tokens),
            output_tokens: usage.as_ref().and_then(|u| u.completion_tokens),
        })
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|_| GenAiError::Configuration("API key is not a valid header".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }
}
