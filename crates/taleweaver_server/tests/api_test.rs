mod support;

use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;
use support::{KITTEN, MemoryVectors, Setup, StubMedia, StubPlaces, StubStory, spawn};
use taleweaver_error::ProviderErrorKind;
use taleweaver_server::StoryResponse;
use uuid::Uuid;

#[tokio::test]
async fn test_api_info_lists_endpoints() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    for path in ["/", "/api"] {
        let body: Value = server.client.get(server.url(path)).send().await?.json().await?;
        assert_eq!(body["message"], "Taleweaver API");
        assert_eq!(body["endpoints"]["health"], "/health");
    }
    Ok(())
}

#[tokio::test]
async fn test_generate_returns_page_with_media_urls() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let response = server
        .client
        .get(server.url("/story/generate?theme=kindness&age=6&lat=47.6&lng=-122.3"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let page: StoryResponse = response.json().await?;

    assert_eq!(page.theme, "kindness");
    assert_eq!(page.story, "A girl finds a lost kitten in the park.");
    assert_eq!(page.location, "Willow Park");
    assert_eq!(page.choices, vec!["Return the kitten", "Keep searching for its owner"]);
    assert_eq!(page.provider_used, "primary");
    assert_eq!(page.page_number, 1);

    let voice = page.voice_file.clone().unwrap();
    assert_eq!(voice, format!("/media/{}/page-1.mp3", page.session_id));
    assert_eq!(page.image_url, format!("/media/{}/page-1.png", page.session_id));
    assert!(page.image_description.contains("kindness"));

    let names: Vec<&str> = page.businesses.iter().map(|b| b.name().as_str()).collect();
    assert!(names.contains(&"Bean There"));
    assert!(!names.contains(&"Starbucks"));

    let audio = server.client.get(server.url(&voice)).send().await?;
    assert_eq!(audio.status(), StatusCode::OK);
    assert_eq!(audio.headers()["content-type"], "audio/mpeg");
    assert_eq!(audio.bytes().await?.as_ref(), b"ID3 narration");
    Ok(())
}

#[tokio::test]
async fn test_generate_defaults_theme_and_reuses_session() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;
    let session = Uuid::new_v4();

    let page: StoryResponse = server
        .client
        .get(server.url(&format!("/story/generate?session={}", session)))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(page.theme, "kindness");
    assert_eq!(page.session_id, session);
    assert!(page.businesses.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_generate_rejects_short_theme() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let response = server
        .client
        .get(server.url("/story/generate?theme=x"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Theme must be at least 2 characters long");
    Ok(())
}

#[tokio::test]
async fn test_generate_rejects_half_a_position() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let response = server
        .client
        .get(server.url("/story/generate?theme=dragons&lat=47.6"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_continue_uses_session_and_page() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;
    let session = Uuid::new_v4();

    let response = server
        .client
        .post(server.url("/story/continue"))
        .json(&json!({
            "theme": "kindness",
            "story_context": "A girl finds a lost kitten.",
            "choice": "Return the kitten",
            "session_id": session,
            "page_number": 3,
            "voice": "shimmer",
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let page: StoryResponse = response.json().await?;

    assert_eq!(page.session_id, session);
    assert_eq!(page.page_number, 3);
    assert_eq!(
        page.voice_file.as_deref(),
        Some(format!("/media/{}/page-3.mp3", session).as_str())
    );
    Ok(())
}

#[tokio::test]
async fn test_continue_requires_choice() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let response = server
        .client
        .post(server.url("/story/continue"))
        .json(&json!({
            "theme": "kindness",
            "story_context": "A girl finds a lost kitten.",
            "choice": " ",
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Choice must be provided");
    Ok(())
}

#[tokio::test]
async fn test_end_has_no_choices() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let page: StoryResponse = server
        .client
        .post(server.url("/story/end"))
        .json(&json!({
            "theme": "kindness",
            "story_context": "A girl finds a lost kitten.",
        }))
        .send()
        .await?
        .json()
        .await?;

    assert!(page.choices.is_empty());
    assert_eq!(page.page_number, 2);
    Ok(())
}

#[tokio::test]
async fn test_exhausted_providers_are_a_server_error() -> anyhow::Result<()> {
    let server = spawn(Setup {
        story: StubStory::failing("primary", ProviderErrorKind::Http("timeout".into())),
        ..Setup::default()
    })
    .await;

    let response = server
        .client
        .get(server.url("/story/generate?theme=kindness"))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await?;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Story generation failed"));
    assert!(message.contains("primary"));
    Ok(())
}

#[tokio::test]
async fn test_broken_media_degrades_gracefully() -> anyhow::Result<()> {
    let server = spawn(Setup {
        media: StubMedia::broken(),
        ..Setup::default()
    })
    .await;

    let page: StoryResponse = server
        .client
        .get(server.url("/story/generate?theme=kindness"))
        .send()
        .await?
        .json()
        .await?;
    assert!(page.voice_file.is_none());
    assert!(page.image_url.starts_with("https://placehold.co/"));

    let demo = server
        .client
        .get(server.url("/voice/demo?voice=alloy"))
        .send()
        .await?;
    assert_eq!(demo.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn test_voice_demo() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let body: Value = server
        .client
        .get(server.url("/voice/demo?voice=alloy"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["voice"], "alloy");
    assert_eq!(body["voice_file"], "/media/demo/voice-alloy.mp3");

    let rejected = server
        .client
        .get(server.url("/voice/demo?voice=..%2Fetc"))
        .send()
        .await?;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_health_reports_each_service() -> anyhow::Result<()> {
    let server = spawn(Setup {
        vectors: MemoryVectors::unconfigured(),
        ..Setup::default()
    })
    .await;

    let body: Value = server.client.get(server.url("/health")).send().await?.json().await?;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let services = body["services"].as_array().unwrap();
    assert_eq!(services[0]["name"], "primary");
    assert_eq!(services[0]["role"], "story");
    assert_eq!(services[0]["status"], "healthy");
    let archive = services.iter().find(|s| s["role"] == "archive").unwrap();
    assert_eq!(archive["status"], "disabled");
    Ok(())
}

#[tokio::test]
async fn test_health_degraded_when_a_provider_fails() -> anyhow::Result<()> {
    let server = spawn(Setup {
        places: StubPlaces::new("geoapify", false, vec![]),
        ..Setup::default()
    })
    .await;

    let body: Value = server.client.get(server.url("/health")).send().await?.json().await?;
    assert_eq!(body["status"], "degraded");
    let places = body["services"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["role"] == "places")
        .unwrap()
        .clone();
    assert_eq!(places["status"], "unhealthy");
    Ok(())
}

#[tokio::test]
async fn test_profile_is_archived_in_background() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let response = server
        .client
        .post(server.url("/profile"))
        .json(&json!({ "name": "Ada Lovelace", "age": 7, "voice": "nova" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body: Value = response.json().await?;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("user_ada_lovelace_"));

    for _ in 0..50 {
        if !server.vectors.records().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(server.vectors.records()[0].id, id);
    Ok(())
}

#[tokio::test]
async fn test_book_validation_and_ids() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let empty = server
        .client
        .post(server.url("/book"))
        .json(&json!({ "theme": "kindness", "pages": [] }))
        .send()
        .await?;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let body: Value = server
        .client
        .post(server.url("/book"))
        .json(&json!({
            "id": "42",
            "theme": "kindness",
            "pages": ["one", "two"],
            "user_name": "Ada",
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["id"], "book_42");
    assert_eq!(body["status"], "accepted");
    Ok(())
}

#[tokio::test]
async fn test_recent_archive_lists_saved_books() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    for id in ["1", "2"] {
        let response = server
            .client
            .post(server.url("/book"))
            .json(&json!({ "id": id, "theme": "kindness", "pages": ["one"] }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
    for _ in 0..50 {
        if server.vectors.records().len() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let body: Value = server
        .client
        .get(server.url("/archive/recent?limit=1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["records"][0]["metadata"]["type"], "book");

    let body: Value = server
        .client
        .get(server.url("/archive/recent"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["count"], 2);
    Ok(())
}

#[tokio::test]
async fn test_recent_archive_unavailable_without_store() -> anyhow::Result<()> {
    let server = spawn(Setup {
        vectors: MemoryVectors::unconfigured(),
        ..Setup::default()
    })
    .await;

    let response = server.client.get(server.url("/archive/recent")).send().await?;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Archive unavailable");
    Ok(())
}

#[tokio::test]
async fn test_location_search() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let nearby: Value = server
        .client
        .get(server.url("/locations/search?lat=47.6&lng=-122.3&limit=2"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(nearby["count"], 2);
    assert_eq!(nearby["backend"], "geoapify");

    let text: Value = server
        .client
        .get(server.url("/locations/search?lat=47.6&lng=-122.3&query=coffee"))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = text["businesses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bean There", "Green Lake"]);

    let invalid = server
        .client
        .get(server.url("/locations/search?lat=123&lng=0"))
        .send()
        .await?;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_story_locations_fall_back_to_demo() -> anyhow::Result<()> {
    let server = spawn(Setup {
        places: StubPlaces::new("geoapify", false, vec![]),
        ..Setup::default()
    })
    .await;

    let body: Value = server
        .client
        .post(server.url("/locations/story"))
        .json(&json!({ "story": KITTEN, "lat": 47.6, "lng": -122.3, "limit": 2 }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["count"], 2);
    assert_eq!(body["backend"], "demo");
    assert_eq!(body["businesses"][0]["name"], "The Friendship Café");
    Ok(())
}

#[tokio::test]
async fn test_missing_media_is_not_found() -> anyhow::Result<()> {
    let server = spawn(Setup::default()).await;

    let missing = server
        .client
        .get(server.url(&format!("/media/{}/page-9.mp3", Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let unknown = server
        .client
        .get(server.url("/media/demo/notes.txt"))
        .send()
        .await?;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    Ok(())
}
