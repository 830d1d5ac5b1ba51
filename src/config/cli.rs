use crate::adapters::google_places::DEFAULT_PLACES_BASE_URL;
use crate::adapters::openrouter::{
    DEFAULT_HTTP_REFERER, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;
use std::path::PathBuf;

/// API keys are read from the environment by default and never printed in help output.
#[derive(Clone, Parser)]
#[command(name = "tripinary")]
#[command(about = "Trip planning API: place lookup proxy, travel tips and itinerary generation")]
pub struct CliConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub google_places_api_key: Option<String>,

    #[arg(long, env = "PLACES_BASE_URL", default_value = DEFAULT_PLACES_BASE_URL)]
    pub places_base_url: String,

    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub openrouter_api_key: Option<String>,

    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_OPENROUTER_BASE_URL)]
    pub openrouter_base_url: String,

    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_OPENROUTER_MODEL)]
    pub openrouter_model: String,

    #[arg(long, default_value = DEFAULT_HTTP_REFERER)]
    pub http_referer: String,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    fn places_api_key(&self) -> &str {
        self.google_places_api_key.as_deref().unwrap_or_default()
    }

    fn places_base_url(&self) -> &str {
        &self.places_base_url
    }

    fn openrouter_api_key(&self) -> &str {
        self.openrouter_api_key.as_deref().unwrap_or_default()
    }

    fn openrouter_base_url(&self) -> &str {
        &self.openrouter_base_url
    }

    fn openrouter_model(&self) -> &str {
        &self.openrouter_model
    }

    fn http_referer(&self) -> &str {
        &self.http_referer
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("google_places_api_key", &self.google_places_api_key)?;
        validate_required_field("openrouter_api_key", &self.openrouter_api_key)?;
        super::validate_provider(self)
    }
}
