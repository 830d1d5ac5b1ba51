use crate::domain::model::ChatCompletion;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Upstream places provider. Responses are returned as raw JSON so they can
/// be passed through to callers untouched.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn text_search(&self, query: &str) -> Result<Value, TransportError>;
    async fn place_details(&self, place_id: &str) -> Result<Value, TransportError>;
}

/// OpenAI-compatible chat completion provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<ChatCompletion, TransportError>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn allowed_origins(&self) -> &[String];
    fn places_api_key(&self) -> &str;
    fn places_base_url(&self) -> &str;
    fn openrouter_api_key(&self) -> &str;
    fn openrouter_base_url(&self) -> &str;
    fn openrouter_model(&self) -> &str;
    fn http_referer(&self) -> &str;

    fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }
}
