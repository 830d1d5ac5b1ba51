use crate::domain::model::{ChatCompletion, ChatMessage, ChatRequest};
use crate::domain::ports::ChatProvider;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "qwen/qwen3-coder:free";
pub const DEFAULT_HTTP_REFERER: &str = "http://localhost:5173/";

#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub http_referer: String,
}

#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    settings: OpenRouterSettings,
}

impl OpenRouterClient {
    pub fn new(settings: OpenRouterSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: OpenRouterSettings) -> Self {
        Self { client, settings }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<ChatCompletion, TransportError> {
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        tracing::debug!(model = %self.settings.model, "Sending chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.settings.api_key)
            .header("HTTP-Referer", &self.settings.http_referer)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Chat completion response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::new(format!(
                "chat completion failed with status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<ChatCompletion>().await?)
    }
}
