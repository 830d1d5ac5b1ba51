use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{ItineraryDay, ItineraryRequest, TravelTip};
use crate::domain::model::normalize_query;
use crate::server::state::AppState;
use crate::utils::error::{ErrorBody, ItineraryError, ProxyError};

#[derive(Debug, Deserialize)]
pub struct PlaceQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TipQuery {
    pub destination: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// GET /api/place-details?query=...
pub async fn place_details(
    State(state): State<AppState>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<Value>, ProxyError> {
    debug!(query = ?params.query, "place-details request");
    let details = state.places.get_place_details(params.query.as_deref()).await?;
    Ok(Json(details))
}

/// GET /api/place-search?query=...
pub async fn place_search(
    State(state): State<AppState>,
    Query(params): Query<PlaceQuery>,
) -> Result<Json<Value>, ProxyError> {
    debug!(query = ?params.query, "place-search request");
    let results = state.places.search_places(params.query.as_deref()).await?;
    Ok(Json(results))
}

/// GET /api/travel-tip?destination=...
pub async fn travel_tip(
    State(state): State<AppState>,
    Query(params): Query<TipQuery>,
) -> Response {
    let Some(destination) = normalize_query(params.destination.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Missing destination")),
        )
            .into_response();
    };

    let tip: TravelTip = state.tips.tip_for(destination).await;
    Json(tip).into_response()
}

/// POST /api/generate-itinerary
pub async fn generate_itinerary(
    State(state): State<AppState>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<Vec<ItineraryDay>>, ItineraryError> {
    let Json(request) =
        payload.map_err(|rejection| ItineraryError::InvalidRequest(rejection.body_text()))?;
    let days = state.itinerary.generate(&request).await?;
    Ok(Json(days))
}
