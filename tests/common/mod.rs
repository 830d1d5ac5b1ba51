//! Shared helpers for HTTP-level tests.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tripinary::adapters::{
    GooglePlacesClient, OpenRouterClient, OpenRouterSettings, PlacesSettings,
};
use tripinary::{create_router, AppState};

pub const PLACES_KEY: &str = "mock_google_api_key";
pub const OPENROUTER_KEY: &str = "mock_openrouter_api_key";

pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawns the router with both providers pointed at the given base URLs.
    pub async fn spawn(places_base_url: &str, openrouter_base_url: &str) -> Self {
        let places = GooglePlacesClient::new(PlacesSettings::new(places_base_url, PLACES_KEY));
        let chat = OpenRouterClient::new(OpenRouterSettings {
            base_url: openrouter_base_url.to_string(),
            api_key: OPENROUTER_KEY.to_string(),
            model: "test/model".to_string(),
            http_referer: "http://localhost:5173/".to_string(),
        });
        let state = AppState::new(Arc::new(places), Arc::new(chat));
        let app = create_router(&[]).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
