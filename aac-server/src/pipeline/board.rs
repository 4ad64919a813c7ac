//! Board and symbol-list assembly
//!
//! Orchestrates the pipeline: category resolution, flattening,
//! deduplication, the seeded shuffle (board path), then per-concept
//! enrichment through the translation and image resolvers and the
//! locale mapper. Read-only against the pool; side effects are
//! confined to cache population inside the resolvers.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;

use aac_common::config::split_csv;

use super::dedupe::dedupe;
use super::image::ImageResolver;
use super::locale::tts_locale_for_lang;
use super::pool::PoolStore;
use super::seed::resolve_seed;
use super::translate::TranslationResolver;

/// Dedup cap on the board path, generous enough to never be the
/// limiting factor before the shuffle+truncate.
const BOARD_DEDUPE_CAP: usize = 2000;

/// One enriched board tile
#[derive(Debug, Clone, Serialize)]
pub struct Tile {
    pub id: String,
    pub concept: String,
    pub label: String,
    pub image_url: String,
    pub tts_lang: &'static str,
}

/// One enriched symbol-list item; same shape as a tile, different
/// identity scheme.
pub type SymbolItem = Tile;

pub struct BoardBuilder {
    pool: Arc<PoolStore>,
    translator: Arc<TranslationResolver>,
    images: Arc<ImageResolver>,
}

impl BoardBuilder {
    pub fn new(
        pool: Arc<PoolStore>,
        translator: Arc<TranslationResolver>,
        images: Arc<ImageResolver>,
    ) -> Self {
        Self {
            pool,
            translator,
            images,
        }
    }

    /// Flat symbol list: requested categories (all categories when none
    /// match), deduped to `limit`, enriched in order. Ids are 1-based
    /// sequential strings.
    pub async fn build_symbol_list(
        &self,
        lang: &str,
        limit: usize,
        cats: Option<&str>,
    ) -> Vec<SymbolItem> {
        let selected = self.resolve_categories(cats.unwrap_or(""));
        let concepts = self.pool.concepts_for(&selected);
        let unique = dedupe(&concepts, limit);

        self.enrich(unique, lang, |i| (i + 1).to_string()).await
    }

    /// Stable-shuffled board: dedupe with a generous cap, shuffle with
    /// the resolved seed, truncate to `size`, enrich. Ids are
    /// `tile_<position>`. Returns the categories actually used so the
    /// response can echo the fallback set.
    pub async fn build_board(
        &self,
        lang: &str,
        size: usize,
        cats: &str,
        seed_token: &str,
    ) -> (Vec<String>, Vec<Tile>) {
        let available = self.resolve_categories(cats);
        let candidates = self.pool.concepts_for(&available);
        let mut deduped = dedupe(&candidates, BOARD_DEDUPE_CAP);

        let mut rng = StdRng::seed_from_u64(resolve_seed(seed_token));
        deduped.shuffle(&mut rng);
        deduped.truncate(size);

        let tiles = self
            .enrich(deduped, lang, |i| format!("tile_{}", i + 1))
            .await;
        (available, tiles)
    }

    /// Requested categories that exist in the pool, in request order;
    /// all pool categories when none match (or none were requested).
    fn resolve_categories(&self, cats: &str) -> Vec<String> {
        let known = self.pool.categories();
        let requested: Vec<String> = split_csv(cats)
            .into_iter()
            .filter(|c| known.contains(c))
            .collect();
        if requested.is_empty() {
            known
        } else {
            requested
        }
    }

    /// Fan out per-concept enrichment concurrently. `join_all` yields
    /// results in input order, so tile ordering is exactly the
    /// pre-enrichment order regardless of provider completion order.
    async fn enrich(
        &self,
        concepts: Vec<String>,
        lang: &str,
        make_id: impl Fn(usize) -> String,
    ) -> Vec<Tile> {
        let tts_lang = tts_locale_for_lang(lang);
        let lookups = concepts.iter().map(|concept| async move {
            let (label, image_url) = tokio::join!(
                self.translator.translate(concept, lang),
                self.images.resolve(concept)
            );
            (label, image_url)
        });

        let enriched = futures::future::join_all(lookups).await;
        enriched
            .into_iter()
            .zip(concepts)
            .enumerate()
            .map(|(i, ((label, image_url), concept))| Tile {
                id: make_id(i),
                concept,
                label,
                image_url,
                tts_lang,
            })
            .collect()
    }
}
