mod common;

use anyhow::Result;
use common::{unreachable_base_url, TestServer, OPENROUTER_KEY};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn completion(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn vancouver_form() -> Value {
    json!({
        "destination": { "name": "Vancouver", "address": "Vancouver, B.C., Canada" },
        "duration": { "num": 2, "timeType": "days" },
        "selectedPlaces": [
            { "id": "1231223", "displayName": { "text": "Stanley Park" } },
            { "id": "1232232", "displayName": { "text": "Gastown" } }
        ],
        "generatedItinerary": null,
        "isLoadingItinerary": true,
        "itineraryError": null
    })
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let upstream = unreachable_base_url().await;
    let server = TestServer::spawn(&upstream, &upstream).await;

    let body: Value = reqwest::get(server.url("/health")).await?.json().await?;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].as_i64().unwrap_or_default() > 0);
    Ok(())
}

#[tokio::test]
async fn test_travel_tip_from_model() -> Result<()> {
    let router = MockServer::start();
    let chat_mock = router.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", format!("Bearer {}", OPENROUTER_KEY))
            .body_contains("visiting Tokyo");
        then.status(200)
            .json_body(completion("Pack light, but carry curiosity."));
    });

    let server = TestServer::spawn(&router.base_url(), &router.base_url()).await;
    let response = reqwest::get(server.url("/api/travel-tip?destination=Tokyo")).await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<Value>().await?,
        json!({ "destination": "Tokyo", "tip": "Pack light, but carry curiosity." })
    );
    chat_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_travel_tip_degrades_when_model_unreachable() -> Result<()> {
    let upstream = unreachable_base_url().await;
    let server = TestServer::spawn(&upstream, &upstream).await;

    let response = reqwest::get(server.url("/api/travel-tip?destination=Osaka")).await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["tip"], "Oops! Couldn't fetch your travel tip.");
    Ok(())
}

#[tokio::test]
async fn test_travel_tip_requires_destination() -> Result<()> {
    let upstream = unreachable_base_url().await;
    let server = TestServer::spawn(&upstream, &upstream).await;

    let response = reqwest::get(server.url("/api/travel-tip")).await?;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.json::<Value>().await?,
        json!({ "error": "Missing destination" })
    );
    Ok(())
}

#[tokio::test]
async fn test_generate_itinerary() -> Result<()> {
    let router = MockServer::start();
    let reply = "```json\n[{\"day\":1,\"items\":[{\"time\":\"9:00 AM\",\"activity\":\"Walk through Stanley Park\"}]},{\"day\":2,\"items\":[{\"time\":\"2:00 PM\",\"activity\":\"Stroll through Gastown\"}]}]\n```";
    let chat_mock = router.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Stanley Park, Gastown");
        then.status(200).json_body(completion(reply));
    });

    let server = TestServer::spawn(&router.base_url(), &router.base_url()).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/generate-itinerary"))
        .json(&vancouver_form())
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.json::<Value>().await?,
        json!([
            { "day": 1, "items": [{ "time": "9:00 AM", "activity": "Walk through Stanley Park" }] },
            { "day": 2, "items": [{ "time": "2:00 PM", "activity": "Stroll through Gastown" }] }
        ])
    );
    chat_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_generate_itinerary_rejects_empty_selection() -> Result<()> {
    let router = MockServer::start();
    let chat_mock = router.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(completion("[]"));
    });

    let mut form = vancouver_form();
    form["selectedPlaces"] = json!([]);

    let server = TestServer::spawn(&router.base_url(), &router.base_url()).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/generate-itinerary"))
        .json(&form)
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.json::<Value>().await?,
        json!({ "error": "No places selected" })
    );
    assert_eq!(chat_mock.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_generate_itinerary_malformed_body_is_400() -> Result<()> {
    let upstream = unreachable_base_url().await;
    let server = TestServer::spawn(&upstream, &upstream).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/generate-itinerary"))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_generate_itinerary_unusable_reply_is_500() -> Result<()> {
    let router = MockServer::start();
    router.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200)
            .json_body(completion("Sorry, I can't plan that trip."));
    });

    let server = TestServer::spawn(&router.base_url(), &router.base_url()).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/generate-itinerary"))
        .json(&vancouver_form())
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Failed to generate itinerary");
    assert!(body["details"].is_string());
    Ok(())
}
