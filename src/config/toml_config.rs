use crate::adapters::google_places::DEFAULT_PLACES_BASE_URL;
use crate::adapters::openrouter::{
    DEFAULT_HTTP_REFERER, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TripinaryError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    pub places: PlacesSection,
    pub openrouter: OpenRouterSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSection {
    pub api_key: String,
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterSection {
    pub api_key: String,
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,
    #[serde(default = "default_openrouter_model")]
    pub model: String,
    #[serde(default = "default_http_referer")]
    pub http_referer: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_places_base_url() -> String {
    DEFAULT_PLACES_BASE_URL.to_string()
}

fn default_openrouter_base_url() -> String {
    DEFAULT_OPENROUTER_BASE_URL.to_string()
}

fn default_openrouter_model() -> String {
    DEFAULT_OPENROUTER_MODEL.to_string()
}

fn default_http_referer() -> String {
    DEFAULT_HTTP_REFERER.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TripinaryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TripinaryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_PLACES_API_KEY})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TripinaryError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn check_placeholders_resolved(&self) -> Result<()> {
        let secrets = [
            ("places.api_key", &self.places.api_key),
            ("openrouter.api_key", &self.openrouter.api_key),
        ];
        for (field, value) in secrets {
            if value.starts_with("${") {
                return Err(TripinaryError::MissingConfigError {
                    field: format!("{} (unset environment variable {})", field, value),
                });
            }
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn allowed_origins(&self) -> &[String] {
        &self.server.allowed_origins
    }

    fn places_api_key(&self) -> &str {
        &self.places.api_key
    }

    fn places_base_url(&self) -> &str {
        &self.places.base_url
    }

    fn openrouter_api_key(&self) -> &str {
        &self.openrouter.api_key
    }

    fn openrouter_base_url(&self) -> &str {
        &self.openrouter.base_url
    }

    fn openrouter_model(&self) -> &str {
        &self.openrouter.model
    }

    fn http_referer(&self) -> &str {
        &self.openrouter.http_referer
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.check_placeholders_resolved()?;
        super::validate_provider(self)
    }
}
