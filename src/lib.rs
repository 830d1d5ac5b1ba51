pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{ItineraryService, PlaceLookupService, TravelTipService};
pub use server::{create_router, AppState};
pub use utils::error::{ProxyError, Result, TripinaryError};
