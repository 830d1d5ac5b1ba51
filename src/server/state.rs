use std::sync::Arc;

use crate::adapters::{GooglePlacesClient, OpenRouterClient, OpenRouterSettings, PlacesSettings};
use crate::core::{
    ChatProvider, ConfigProvider, ItineraryService, PlaceLookupService, PlacesProvider,
    TravelTipService,
};
use crate::utils::error::Result;

/// Application state shared across handlers. Holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub places: PlaceLookupService,
    pub tips: TravelTipService,
    pub itinerary: ItineraryService,
}

impl AppState {
    pub fn new(places: Arc<dyn PlacesProvider>, chat: Arc<dyn ChatProvider>) -> Self {
        Self {
            places: PlaceLookupService::new(places),
            tips: TravelTipService::new(chat.clone()),
            itinerary: ItineraryService::new(chat),
        }
    }

    /// Credentials are copied out of the config once, at startup.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tripinary/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let places = GooglePlacesClient::with_client(
            client.clone(),
            PlacesSettings::new(config.places_base_url(), config.places_api_key()),
        );
        let chat = OpenRouterClient::with_client(
            client,
            OpenRouterSettings {
                base_url: config.openrouter_base_url().to_string(),
                api_key: config.openrouter_api_key().to_string(),
                model: config.openrouter_model().to_string(),
                http_referer: config.http_referer().to_string(),
            },
        );

        Ok(Self::new(Arc::new(places), Arc::new(chat)))
    }
}
