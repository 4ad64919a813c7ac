//! AAC board and symbol-list endpoints
//!
//! Parameter bounds are enforced here, before the pipeline runs; the
//! pipeline itself has no failure mode short of an empty fallback
//! pool, which cannot happen by construction.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pipeline::{SymbolItem, Tile};
use crate::AppState;

use super::error::ApiError;

const DEFAULT_BOARD_CATS: &str = "core,indian_food,actions,feelings";

const SYMBOLS_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=500;
const BOARD_SIZE_RANGE: std::ops::RangeInclusive<usize> = 4..=60;

fn default_lang() -> String {
    "en".to_string()
}

fn default_limit() -> usize {
    50
}

fn default_size() -> usize {
    25
}

fn default_board_cats() -> String {
    DEFAULT_BOARD_CATS.to_string()
}

fn default_seed() -> String {
    "today".to_string()
}

/// GET /aac/categories response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// GET /aac/categories
///
/// Category names for the UI's filter chips, sorted.
pub async fn get_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state.pool.categories(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SymbolsQuery {
    /// Language code like en, hi, ta
    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Comma-separated categories; all categories when absent
    pub cats: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub lang: String,
    pub count: usize,
    pub items: Vec<SymbolItem>,
}

/// GET /aac/symbols?lang=<code>&limit=<1..500>&cats=<comma-separated>
pub async fn get_symbols(
    State(state): State<AppState>,
    Query(query): Query<SymbolsQuery>,
) -> Result<Json<SymbolsResponse>, ApiError> {
    if !SYMBOLS_LIMIT_RANGE.contains(&query.limit) {
        return Err(ApiError::InvalidParam(format!(
            "limit must be between {} and {}",
            SYMBOLS_LIMIT_RANGE.start(),
            SYMBOLS_LIMIT_RANGE.end()
        )));
    }

    let items = state
        .boards
        .build_symbol_list(&query.lang, query.limit, query.cats.as_deref())
        .await;

    Ok(Json(SymbolsResponse {
        lang: query.lang,
        count: items.len(),
        items,
    }))
}

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_size")]
    pub size: usize,

    #[serde(default = "default_board_cats")]
    pub cats: String,

    /// today | random | any-string
    #[serde(default = "default_seed")]
    pub seed: String,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub lang: String,
    pub size: usize,
    pub cats: Vec<String>,
    pub seed: String,
    pub tiles: Vec<Tile>,
}

/// GET /aac/board?lang=<code>&size=<4..60>&cats=<comma-separated>&seed=<token>
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardResponse>, ApiError> {
    if !BOARD_SIZE_RANGE.contains(&query.size) {
        return Err(ApiError::InvalidParam(format!(
            "size must be between {} and {}",
            BOARD_SIZE_RANGE.start(),
            BOARD_SIZE_RANGE.end()
        )));
    }

    let (cats, tiles) = state
        .boards
        .build_board(&query.lang, query.size, &query.cats, &query.seed)
        .await;

    Ok(Json(BoardResponse {
        lang: query.lang,
        size: query.size,
        cats,
        seed: query.seed,
        tiles,
    }))
}
