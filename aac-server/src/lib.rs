//! aac-server library - AAC board assembly service
//!
//! Builds communication boards for an AAC frontend: selects concepts
//! from a category-organized vocabulary pool, translates them, resolves
//! a representative pictogram for each, and attaches a text-to-speech
//! locale.

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pipeline;
pub mod providers;
pub mod refresh;

use pipeline::{BoardBuilder, PoolStore};
use providers::SpeechProvider;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Vocabulary pool (shared with the background refresh task)
    pub pool: Arc<PoolStore>,
    /// Board/list builder over the content-resolution pipeline
    pub boards: Arc<BoardBuilder>,
    /// Speech synthesis provider for /aac/speak
    pub speech: Arc<dyn SpeechProvider>,
}

impl AppState {
    pub fn new(
        pool: Arc<PoolStore>,
        boards: Arc<BoardBuilder>,
        speech: Arc<dyn SpeechProvider>,
    ) -> Self {
        Self {
            pool,
            boards,
            speech,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/aac/categories", get(api::get_categories))
        .route("/aac/symbols", get(api::get_symbols))
        .route("/aac/board", get(api::get_board))
        .route("/aac/speak", post(api::post_speak))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
