//! Integration tests for the aac-server HTTP API
//!
//! The router is exercised with `tower::ServiceExt::oneshot` against
//! stub providers, so no network access is needed and provider
//! behavior is fully scripted.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower::util::ServiceExt;

use aac_server::pipeline::{
    BoardBuilder, ConceptMap, ConceptPool, ImageResolver, PoolStore, TranslationResolver,
};
use aac_server::providers::{
    ImageSearchProvider, Pictogram, PictogramProvider, ProviderError, SpeechProvider,
    TranslateProvider,
};
use aac_server::{build_router, AppState};
use async_trait::async_trait;

struct StubTranslator;

#[async_trait]
impl TranslateProvider for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        _source_lang: &str,
    ) -> Result<String, ProviderError> {
        Ok(format!("{}@{}", text, target_lang))
    }
}

/// Every term finds one exact-keyword pictogram.
struct StubPictograms;

#[async_trait]
impl PictogramProvider for StubPictograms {
    async fn search(&self, term: &str) -> Result<Vec<Pictogram>, ProviderError> {
        Ok(vec![Pictogram {
            id: 1,
            keywords: vec![term.to_string()],
            image_url: format!("https://pictures.test/{}.png", term),
        }])
    }
}

struct StubImages;

#[async_trait]
impl ImageSearchProvider for StubImages {
    fn is_configured(&self) -> bool {
        false
    }

    async fn search_image(&self, _query: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

struct StubSpeech {
    fail: bool,
}

#[async_trait]
impl SpeechProvider for StubSpeech {
    async fn synthesize(&self, _text: &str, _locale: &str) -> Result<Vec<u8>, ProviderError> {
        if self.fail {
            Err(ProviderError::Network("unreachable".to_string()))
        } else {
            Ok(vec![0xff, 0xfb, 0x90, 0x00])
        }
    }
}

fn test_pool() -> ConceptPool {
    let mut pool = BTreeMap::new();
    pool.insert(
        "actions".to_string(),
        ["go", "stop", "come", "sit", "run", "jump"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    pool.insert(
        "core".to_string(),
        ["I", "you", "help", "want", "more", "stop", "go"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    pool.insert(
        "feelings".to_string(),
        ["happy", "sad", "angry"].iter().map(|s| s.to_string()).collect(),
    );
    pool
}

fn setup_app_with_speech(speech: Arc<dyn SpeechProvider>) -> Router {
    let pool = Arc::new(PoolStore::from_pool(test_pool()));
    let translator = Arc::new(TranslationResolver::new(Arc::new(StubTranslator)));
    let images = Arc::new(ImageResolver::new(
        Arc::new(StubPictograms),
        Arc::new(StubImages),
        ConceptMap::new(),
    ));
    let boards = Arc::new(BoardBuilder::new(Arc::clone(&pool), translator, images));
    build_router(AppState::new(pool, boards, speech))
}

fn setup_app() -> Router {
    setup_app_with_speech(Arc::new(StubSpeech { fail: false }))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn get_json(app: Router, uri: &str) -> Value {
    let response = app.oneshot(get(uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    extract_json(response.into_body()).await
}

// ---------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let body = get_json(setup_app(), "/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "aac-server");
    assert!(body["version"].is_string());
}

// ---------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------

#[tokio::test]
async fn categories_are_listed_sorted() {
    let body = get_json(setup_app(), "/aac/categories").await;
    assert_eq!(body["categories"], json!(["actions", "core", "feelings"]));
}

// ---------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------

#[tokio::test]
async fn symbols_returns_enriched_items_with_sequential_ids() {
    let body = get_json(setup_app(), "/aac/symbols?lang=hi&limit=3&cats=core").await;
    assert_eq!(body["lang"], "hi");
    assert_eq!(body["count"], 3);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[1]["id"], "2");
    assert_eq!(items[0]["concept"], "I");
    assert_eq!(items[0]["label"], "I@hi");
    assert_eq!(items[0]["tts_lang"], "hi-IN");
    assert_eq!(items[0]["image_url"], "https://pictures.test/i.png");
}

#[tokio::test]
async fn symbols_deduplicates_across_categories() {
    let body = get_json(setup_app(), "/aac/symbols?limit=500").await;
    // actions (6) + core (7) + feelings (3), minus stop/go repeats
    assert_eq!(body["count"], 14);
}

#[tokio::test]
async fn symbols_limit_out_of_range_is_rejected() {
    for uri in ["/aac/symbols?limit=0", "/aac/symbols?limit=501"] {
        let response = setup_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
        let body = extract_json(response.into_body()).await;
        assert!(body["error"].as_str().unwrap().contains("limit"));
    }
}

// ---------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------

#[tokio::test]
async fn board_returns_exactly_the_requested_size() {
    let body = get_json(setup_app(), "/aac/board?size=4&cats=core&seed=t").await;
    assert_eq!(body["size"], 4);
    let tiles = body["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 4);
    assert_eq!(tiles[0]["id"], "tile_1");
    assert_eq!(tiles[3]["id"], "tile_4");
}

#[tokio::test]
async fn board_is_deterministic_for_a_fixed_seed() {
    let uri = "/aac/board?lang=en&size=10&cats=core&seed=fixed-token";
    let first = get_json(setup_app(), uri).await;
    let second = get_json(setup_app(), uri).await;
    assert_eq!(first["tiles"], second["tiles"]);
}

#[tokio::test]
async fn board_unknown_categories_fall_back_to_all() {
    let body = get_json(setup_app(), "/aac/board?size=4&cats=doesnotexist&seed=t").await;
    assert_eq!(body["cats"], json!(["actions", "core", "feelings"]));
    assert_eq!(body["tiles"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn board_echoes_only_the_known_requested_categories() {
    let body = get_json(setup_app(), "/aac/board?size=4&cats=core,nope,feelings&seed=t").await;
    assert_eq!(body["cats"], json!(["core", "feelings"]));
}

#[tokio::test]
async fn board_defaults_apply_without_query_parameters() {
    let body = get_json(setup_app(), "/aac/board").await;
    assert_eq!(body["lang"], "en");
    assert_eq!(body["size"], 25);
    assert_eq!(body["seed"], "today");
    // Default cats include unknown ones (indian_food is absent from
    // the test pool); the known remainder is used.
    assert_eq!(body["cats"], json!(["core", "actions", "feelings"]));
}

#[tokio::test]
async fn board_size_out_of_range_is_rejected() {
    for uri in ["/aac/board?size=3", "/aac/board?size=61"] {
        let response = setup_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "GET {}", uri);
    }
}

// ---------------------------------------------------------------------
// Speak
// ---------------------------------------------------------------------

fn post_speak(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/aac/speak")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn speak_returns_mp3_audio() {
    let app = setup_app();
    let response = app
        .oneshot(post_speak(json!({"text": "help", "lang": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "audio/mpeg"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn speak_provider_failure_surfaces_as_bad_gateway() {
    let app = setup_app_with_speech(Arc::new(StubSpeech { fail: true }));
    let response = app
        .oneshot(post_speak(json!({"text": "help", "lang": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn speak_rejects_empty_text() {
    let app = setup_app();
    let response = app
        .oneshot(post_speak(json!({"text": "  ", "lang": "en"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
