use crate::domain::ports::PlacesProvider;
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";

const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";
const DETAILS_PATH: &str = "/maps/api/place/details/json";

#[derive(Debug, Clone)]
pub struct PlacesSettings {
    pub base_url: String,
    pub api_key: String,
}

impl PlacesSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Google Places web service client (query-string API).
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    settings: PlacesSettings,
}

impl GooglePlacesClient {
    pub fn new(settings: PlacesSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: PlacesSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, TransportError> {
        let url = self.endpoint(path);
        tracing::debug!("Making Places API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.settings.api_key.as_str())])
            .send()
            .await?;

        tracing::debug!("Places API response status: {}", response.status());

        // 上游即使回傳非 2xx，內容仍是 JSON，交由呼叫端判斷 status 欄位
        let body: Value = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn text_search(&self, query: &str) -> Result<Value, TransportError> {
        self.get_json(TEXT_SEARCH_PATH, &[("query", query)]).await
    }

    async fn place_details(&self, place_id: &str) -> Result<Value, TransportError> {
        self.get_json(DETAILS_PATH, &[("place_id", place_id)]).await
    }
}
