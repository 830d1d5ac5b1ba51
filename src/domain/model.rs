use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status the places provider reports for a successful call.
pub const PLACES_STATUS_OK: &str = "OK";

pub const TIP_FALLBACK: &str = "No tip available, but adventure awaits!";
pub const TIP_UNAVAILABLE: &str = "Oops! Couldn't fetch your travel tip.";

/// Longest itinerary we ask the model for, in days.
pub const MAX_ITINERARY_DAYS: u32 = 14;

/// Trims a raw query parameter, treating blank input as absent.
pub fn normalize_query(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|q| !q.is_empty())
}

/// `results[0].place_id` of a text-search response.
pub fn first_place_id(text_search: &Value) -> Option<&str> {
    text_search
        .get("results")?
        .as_array()?
        .first()?
        .get("place_id")?
        .as_str()
        .filter(|id| !id.is_empty())
}

pub fn provider_status(response: &Value) -> Option<&str> {
    response.get("status").and_then(Value::as_str)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Content of the first choice, if it has any non-blank text.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelTip {
    pub destination: String,
    pub tip: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub destination: Destination,
    pub duration: TripDuration,
    #[serde(default)]
    pub selected_places: Vec<SelectedPlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Destination {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDuration {
    pub num: u32,
    pub time_type: Option<TimeUnit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Days,
    Weeks,
}

impl TripDuration {
    /// Number of itinerary days the duration covers, capped at [`MAX_ITINERARY_DAYS`].
    /// A missing unit counts as days.
    pub fn day_count(&self) -> Option<u32> {
        if self.num == 0 {
            return None;
        }
        let days = match self.time_type.unwrap_or(TimeUnit::Days) {
            TimeUnit::Hours => 1,
            TimeUnit::Days => self.num,
            TimeUnit::Weeks => self.num.saturating_mul(7),
        };
        Some(days.min(MAX_ITINERARY_DAYS))
    }
}

/// A point of interest picked by the user. Extra provider fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectedPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<DisplayName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayName {
    pub text: String,
}

impl SelectedPlace {
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.display_name.as_ref().map(|d| d.text.as_str()))
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day: u32,
    #[serde(default)]
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItineraryItem {
    pub time: String,
    pub activity: String,
}
