pub mod itinerary;
pub mod place_lookup;
pub mod travel_tips;

pub use crate::domain::model::{ItineraryDay, ItineraryRequest, TravelTip};
pub use crate::domain::ports::{ChatProvider, ConfigProvider, PlacesProvider};
pub use crate::utils::error::{ItineraryError, ProxyError, Result};

pub use itinerary::ItineraryService;
pub use place_lookup::PlaceLookupService;
pub use travel_tips::TravelTipService;
