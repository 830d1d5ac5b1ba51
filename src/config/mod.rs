#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_secret, validate_url,
};

/// Checks shared by every config source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("host", config.host())?;
    validate_positive_number("port", config.port() as usize, 1)?;
    validate_secret("google_places_api_key", config.places_api_key())?;
    validate_url("places_base_url", config.places_base_url())?;
    validate_secret("openrouter_api_key", config.openrouter_api_key())?;
    validate_url("openrouter_base_url", config.openrouter_base_url())?;
    validate_non_empty_string("openrouter_model", config.openrouter_model())?;
    for origin in config.allowed_origins() {
        validate_url("allowed_origins", origin)?;
    }
    Ok(())
}
