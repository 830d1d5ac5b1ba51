use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{warn, Level};

use crate::server::handlers::{generate_itinerary, health, place_details, place_search, travel_tip};
use crate::server::state::AppState;

/// Builds the API router. An empty origin list allows any origin.
pub fn create_router(allowed_origins: &[String]) -> Router<AppState> {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &axum::http::Request<_>| {
            tracing::info_span!("http_request", method = %req.method(), path = %req.uri().path())
        })
        .on_request(tower_http::trace::DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            tower_http::trace::DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Millis),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api/place-details", get(place_details))
        .route("/api/place-search", get(place_search))
        .route("/api/travel-tip", get(travel_tip))
        .route("/api/generate-itinerary", post(generate_itinerary))
        .layer(cors_layer(allowed_origins))
        .layer(trace)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim_end_matches('/')) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
