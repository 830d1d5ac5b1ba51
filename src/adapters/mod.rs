// Adapters layer: reqwest-backed implementations of the domain ports.

pub mod google_places;
pub mod openrouter;

pub use google_places::{GooglePlacesClient, PlacesSettings};
pub use openrouter::{OpenRouterClient, OpenRouterSettings};
