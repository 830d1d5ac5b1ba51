use crate::domain::model::{TravelTip, TIP_FALLBACK, TIP_UNAVAILABLE};
use crate::domain::ports::ChatProvider;
use std::sync::Arc;

pub fn tip_prompt(destination: &str) -> String {
    format!(
        "Give a short one-liner helpful travel tip for someone visiting {}. Keep it under 15 words, and make it witty, practical, or surprising.",
        destination
    )
}

/// Generates one-line travel tips. Never fails: upstream problems degrade to
/// a canned message.
#[derive(Clone)]
pub struct TravelTipService {
    chat: Arc<dyn ChatProvider>,
}

impl TravelTipService {
    pub fn new(chat: Arc<dyn ChatProvider>) -> Self {
        Self { chat }
    }

    pub async fn tip_for(&self, destination: &str) -> TravelTip {
        tracing::info!(destination, "Requesting travel tip");

        let tip = match self.chat.complete(&tip_prompt(destination)).await {
            Ok(completion) => completion
                .first_content()
                .unwrap_or(TIP_FALLBACK)
                .to_string(),
            Err(e) => {
                tracing::warn!("Failed to fetch travel tip: {}", e);
                TIP_UNAVAILABLE.to_string()
            }
        };

        TravelTip {
            destination: destination.to_string(),
            tip,
        }
    }
}
