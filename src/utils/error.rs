use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripinaryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    System,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TripinaryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TripinaryError::ConfigError { .. }
            | TripinaryError::ConfigValidationError { .. }
            | TripinaryError::MissingConfigError { .. }
            | TripinaryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TripinaryError::HttpClientError(_) => ErrorCategory::Network,
            TripinaryError::SerializationError(_) => ErrorCategory::Data,
            TripinaryError::IoError(_) | TripinaryError::ServerError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            TripinaryError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            TripinaryError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            TripinaryError::ConfigValidationError { field, message } => {
                format!("Invalid configuration in '{}': {}", field, message)
            }
            TripinaryError::ConfigError { message } => format!("Configuration problem: {}", message),
            TripinaryError::IoError(e) => format!("File system error: {}", e),
            TripinaryError::ServerError { message } => format!("Server failed: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TripinaryError::MissingConfigError { .. } => {
                "Set GOOGLE_PLACES_API_KEY and OPENROUTER_API_KEY, or pass them with --google-places-api-key / --openrouter-api-key"
            }
            TripinaryError::InvalidConfigValueError { .. }
            | TripinaryError::ConfigValidationError { .. }
            | TripinaryError::ConfigError { .. } => {
                "Check the command line flags and the TOML config file"
            }
            TripinaryError::IoError(_) => "Check that the config file exists and is readable",
            TripinaryError::ServerError { .. } => {
                "Check that the port is free and the host address is valid"
            }
            TripinaryError::HttpClientError(_) => "Check network connectivity and TLS setup",
            TripinaryError::SerializationError(_) => "Check the payload format",
        }
    }
}

pub type Result<T> = std::result::Result<T, TripinaryError>;

/// Transport-level failure talking to an upstream provider.
///
/// Carries only the message so callers can forward it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Joins an error and its sources with ": ".
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

impl From<reqwest::Error> for TransportError {
    /// Request URLs carry the API key as a query parameter, so the URL is
    /// stripped and only the underlying cause chain is kept.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        match std::error::Error::source(&err) {
            Some(cause) => Self::new(error_chain(cause)),
            None => Self::new(err.to_string()),
        }
    }
}

/// Which of the two provider calls a lookup failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    TextSearch,
    Details,
}

impl LookupStage {
    fn label(self) -> &'static str {
        match self {
            LookupStage::TextSearch => "text search",
            LookupStage::Details => "details",
        }
    }
}

/// Place lookup failures, each mapped to a fixed HTTP status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProxyError {
    #[error("Missing query")]
    MissingQuery,

    #[error("No place found for query")]
    NoResultsFound { details: serde_json::Value },

    #[error("Google API error (details)")]
    ProviderError { details: serde_json::Value },

    #[error("Failed to fetch from Google Places API ({})", .stage.label())]
    NetworkFailure { stage: LookupStage, details: String },
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingQuery => StatusCode::BAD_REQUEST,
            ProxyError::NoResultsFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::ProviderError { .. } | ProxyError::NetworkFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ProxyError::MissingQuery => None,
            ProxyError::NoResultsFound { details } | ProxyError::ProviderError { details } => {
                Some(details.clone())
            }
            ProxyError::NetworkFailure { details, .. } => {
                Some(serde_json::Value::String(details.clone()))
            }
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
        }
    }
}

/// Error response shape shared by every handler.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItineraryError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to generate itinerary")]
    Generation { details: String },
}

impl IntoResponse for ItineraryError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ItineraryError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(message.clone()))
            }
            ItineraryError::Generation { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(self.to_string())
                    .with_details(serde_json::Value::String(details.clone())),
            ),
        };
        (status, Json(body)).into_response()
    }
}
