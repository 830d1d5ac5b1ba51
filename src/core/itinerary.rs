use crate::domain::model::{ItineraryDay, ItineraryRequest};
use crate::domain::ports::ChatProvider;
use crate::utils::error::ItineraryError;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;

/// A request that passed validation, ready to be turned into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPlan {
    pub destination: String,
    pub days: u32,
    pub places: Vec<String>,
}

impl TryFrom<&ItineraryRequest> for ItineraryPlan {
    type Error = ItineraryError;

    fn try_from(request: &ItineraryRequest) -> Result<Self, Self::Error> {
        let destination = request
            .destination
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ItineraryError::InvalidRequest("Missing destination".to_string()))?;

        let days = request
            .duration
            .day_count()
            .ok_or_else(|| ItineraryError::InvalidRequest("Invalid duration".to_string()))?;

        let places: Vec<String> = request
            .selected_places
            .iter()
            .filter_map(|p| p.label())
            .map(str::to_string)
            .collect();
        if places.is_empty() {
            return Err(ItineraryError::InvalidRequest(
                "No places selected".to_string(),
            ));
        }

        Ok(Self {
            destination: destination.to_string(),
            days,
            places,
        })
    }
}

impl ItineraryPlan {
    pub fn prompt(&self) -> String {
        format!(
            "Create a {days}-day travel itinerary for {destination} that includes these places: {places}. \
Respond with only a JSON array with one element per day, shaped like \
[{{\"day\": 1, \"items\": [{{\"time\": \"9:00 AM\", \"activity\": \"...\"}}]}}]. \
Use 12-hour times and keep each activity under 12 words.",
            days = self.days,
            destination = self.destination,
            places = self.places.join(", ")
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItineraryReply {
    Days(Vec<ItineraryDay>),
    Wrapped { itinerary: Vec<ItineraryDay> },
}

/// Body of the first markdown code fence, if the reply has one.
fn fenced_block(reply: &str) -> Result<Option<&str>, ItineraryError> {
    let fence = Regex::new(r"(?s)```[A-Za-z]*\s*(.*?)```").map_err(|e| {
        ItineraryError::Generation {
            details: format!("invalid fence pattern: {}", e),
        }
    })?;
    Ok(fence
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str()))
}

/// Pulls the day list out of a model reply, tolerating code fences and
/// surrounding prose. Days are renumbered from 1 in reply order.
pub fn parse_itinerary(reply: &str) -> Result<Vec<ItineraryDay>, ItineraryError> {
    // 有 code fence 時只看 fence 內容，避免前後文字中的括號干擾
    let candidate = fenced_block(reply)?.unwrap_or(reply);
    let start = candidate.find(&['[', '{'][..]);
    let end = candidate.rfind(&[']', '}'][..]);
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &candidate[s..=e],
        _ => {
            return Err(ItineraryError::Generation {
                details: "model reply contained no JSON".to_string(),
            })
        }
    };

    let parsed: ItineraryReply =
        serde_json::from_str(json).map_err(|e| ItineraryError::Generation {
            details: format!("model reply was not a valid itinerary: {}", e),
        })?;
    let mut days = match parsed {
        ItineraryReply::Days(days) | ItineraryReply::Wrapped { itinerary: days } => days,
    };

    if days.is_empty() {
        return Err(ItineraryError::Generation {
            details: "model returned an empty itinerary".to_string(),
        });
    }

    for (index, day) in days.iter_mut().enumerate() {
        day.day = index as u32 + 1;
    }
    Ok(days)
}

#[derive(Clone)]
pub struct ItineraryService {
    chat: Arc<dyn ChatProvider>,
}

impl ItineraryService {
    pub fn new(chat: Arc<dyn ChatProvider>) -> Self {
        Self { chat }
    }

    pub async fn generate(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Vec<ItineraryDay>, ItineraryError> {
        let plan = ItineraryPlan::try_from(request)?;
        tracing::info!(
            destination = %plan.destination,
            days = plan.days,
            places = plan.places.len(),
            "Generating itinerary"
        );

        let completion = self.chat.complete(&plan.prompt()).await.map_err(|e| {
            tracing::warn!("Itinerary request failed: {}", e);
            ItineraryError::Generation {
                details: e.message().to_string(),
            }
        })?;

        let reply = completion
            .first_content()
            .ok_or_else(|| ItineraryError::Generation {
                details: "model returned no content".to_string(),
            })?;

        let days = parse_itinerary(reply)?;
        if days.len() as u32 != plan.days {
            tracing::debug!(
                expected = plan.days,
                actual = days.len(),
                "Model returned a different number of days"
            );
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ChatCompletion, ItineraryItem};
    use crate::utils::error::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingChat {
        reply: Result<String, TransportError>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for RecordingChat {
        async fn complete(&self, prompt: &str) -> Result<ChatCompletion, TransportError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let content = self.reply.clone()?;
            Ok(serde_json::from_value(json!({
                "choices": [{ "message": { "content": content } }]
            }))
            .unwrap())
        }
    }

    fn chat(reply: Result<&str, TransportError>) -> Arc<RecordingChat> {
        Arc::new(RecordingChat {
            reply: reply.map(str::to_string),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn vancouver_request() -> ItineraryRequest {
        serde_json::from_value(json!({
            "destination": { "name": "Vancouver", "address": "Vancouver, B.C., Canada" },
            "duration": { "num": 2, "timeType": "days" },
            "selectedPlaces": [
                { "name": "Stanley Park", "place_id": "1231223" },
                { "name": "Gastown", "place_id": "1232232" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_plan_from_request() {
        let plan = ItineraryPlan::try_from(&vancouver_request()).unwrap();
        assert_eq!(plan.destination, "Vancouver");
        assert_eq!(plan.days, 2);
        assert_eq!(plan.places, vec!["Stanley Park", "Gastown"]);
        assert!(plan.prompt().contains("2-day travel itinerary for Vancouver"));
        assert!(plan.prompt().contains("Stanley Park, Gastown"));
    }

    #[test]
    fn test_plan_rejects_invalid_requests() {
        let mut request = vancouver_request();
        request.destination.name = Some("  ".to_string());
        assert_eq!(
            ItineraryPlan::try_from(&request),
            Err(ItineraryError::InvalidRequest("Missing destination".to_string()))
        );

        let mut request = vancouver_request();
        request.duration.num = 0;
        assert_eq!(
            ItineraryPlan::try_from(&request),
            Err(ItineraryError::InvalidRequest("Invalid duration".to_string()))
        );

        let mut request = vancouver_request();
        request.selected_places.clear();
        assert_eq!(
            ItineraryPlan::try_from(&request),
            Err(ItineraryError::InvalidRequest("No places selected".to_string()))
        );
    }

    #[test]
    fn test_parse_fenced_reply_and_renumber() {
        let reply = "Here you go!\n```json\n[{\"day\": 3, \"items\": [{\"time\": \"9:00 AM\", \"activity\": \"Walk through Stanley Park\"}]}, {\"day\": 7, \"items\": []}]\n```";
        let days = parse_itinerary(reply).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[1].day, 2);
        assert_eq!(
            days[0].items[0],
            ItineraryItem {
                time: "9:00 AM".to_string(),
                activity: "Walk through Stanley Park".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_ignores_brackets_outside_fence() {
        let reply = "Sure [see below]:\n```json\n[{\"day\": 1, \"items\": [{\"time\": \"10:00 AM\", \"activity\": \"Visit Science World\"}]}]\n```\nHave fun {enjoy}!";
        let days = parse_itinerary(reply).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].items[0].activity, "Visit Science World");
    }

    #[test]
    fn test_parse_wrapped_reply() {
        let reply = r#"{"itinerary": [{"day": 1, "items": []}]}"#;
        assert_eq!(parse_itinerary(reply).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage_and_empty() {
        assert!(matches!(
            parse_itinerary("I cannot help with that."),
            Err(ItineraryError::Generation { .. })
        ));
        assert!(matches!(
            parse_itinerary("[]"),
            Err(ItineraryError::Generation { .. })
        ));
    }

    #[tokio::test]
    async fn test_generate_returns_days() {
        let chat = chat(Ok(r#"[{"day":1,"items":[{"time":"10:00 AM","activity":"Visit Science World"}]},{"day":2,"items":[]}]"#));
        let service = ItineraryService::new(chat.clone());

        let days = service.generate(&vancouver_request()).await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].items[0].activity, "Visit Science World");
        assert_eq!(chat.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_invalid_request_skips_model() {
        let chat = chat(Ok("[]"));
        let service = ItineraryService::new(chat.clone());
        let mut request = vancouver_request();
        request.selected_places.clear();

        assert!(service.generate(&request).await.is_err());
        assert!(chat.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        let service = ItineraryService::new(chat(Err(TransportError::new("timeout"))));
        let err = service.generate(&vancouver_request()).await.unwrap_err();
        assert_eq!(
            err,
            ItineraryError::Generation {
                details: "timeout".to_string()
            }
        );
    }
}
