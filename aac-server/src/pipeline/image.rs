//! Ranked multi-tier image resolver
//!
//! `resolve` never fails; it degrades through four tiers:
//! 1. concept-map alternate terms -> best-scored pictogram
//! 2. the literal concept -> best-scored pictogram
//! 3. generic image search, if credentials are configured
//! 4. fixed placeholder URL
//!
//! Results are cached under `(cache version, normalized concept)`.
//! Bumping `IMAGE_CACHE_VERSION` is the only invalidation mechanism:
//! the new version forms a disjoint key space and old entries simply
//! become unreachable.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use aac_common::{normalize, ShardedCache};
use futures::future::join_all;

use crate::providers::{ImageSearchProvider, Pictogram, PictogramProvider};

/// Bump when the matching logic changes to bust stale cache entries.
pub const IMAGE_CACHE_VERSION: &str = "v2";

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/256?text=AAC";

/// Raw results considered per search term, to bound scoring cost.
const MAX_RESULTS_PER_TERM: usize = 25;

const SCORE_EXACT: i64 = 100;
const SCORE_PARTIAL: i64 = 20;

/// Optional mapping from normalized concept to alternate search terms
/// that bias pictogram search toward better matches than the literal
/// concept string.
pub type ConceptMap = HashMap<String, Vec<String>>;

/// Load the concept map file. Absence or unparseable content degrades
/// to an empty map; the resolver then always searches tier 2 directly.
pub fn load_concept_map(path: &Path) -> ConceptMap {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(_) => return ConceptMap::new(),
    };
    match serde_json::from_str::<ConceptMap>(&text) {
        Ok(map) => map
            .into_iter()
            .map(|(concept, terms)| (normalize(&concept), terms))
            .collect(),
        Err(e) => {
            warn!("Concept map {} unparseable ({}), ignoring", path.display(), e);
            ConceptMap::new()
        }
    }
}

pub struct ImageResolver {
    cache: Arc<ShardedCache>,
    cache_version: String,
    concept_map: ConceptMap,
    pictograms: Arc<dyn PictogramProvider>,
    images: Arc<dyn ImageSearchProvider>,
}

impl ImageResolver {
    pub fn new(
        pictograms: Arc<dyn PictogramProvider>,
        images: Arc<dyn ImageSearchProvider>,
        concept_map: ConceptMap,
    ) -> Self {
        Self::with_cache(
            pictograms,
            images,
            concept_map,
            Arc::new(ShardedCache::new()),
            IMAGE_CACHE_VERSION,
        )
    }

    /// Constructor with an injected cache and version tag, so tests
    /// can observe version-bump behavior against one shared cache.
    pub fn with_cache(
        pictograms: Arc<dyn PictogramProvider>,
        images: Arc<dyn ImageSearchProvider>,
        concept_map: ConceptMap,
        cache: Arc<ShardedCache>,
        cache_version: &str,
    ) -> Self {
        Self {
            cache,
            cache_version: cache_version.to_string(),
            concept_map,
            pictograms,
            images,
        }
    }

    /// Resolve a representative image URL for `concept`. Always
    /// returns a URL; the placeholder is the floor.
    pub async fn resolve(&self, concept: &str) -> String {
        let norm = normalize(concept);
        let key = format!("{}:{}", self.cache_version, norm);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let url = self.lookup(concept, &norm).await;
        self.cache.insert(&key, url.clone());
        url
    }

    async fn lookup(&self, concept: &str, norm: &str) -> String {
        // Tier 1: concept-map alternate terms
        if let Some(terms) = self.concept_map.get(norm) {
            if let Some(url) = self.best_pictogram(terms).await {
                return url;
            }
        }

        // Tier 2: the literal concept
        if let Some(url) = self.best_pictogram(&[concept.to_string()]).await {
            return url;
        }

        // Tier 3: generic image search, skipped without credentials
        if self.images.is_configured() {
            match self
                .images
                .search_image(&format!("{} pictogram icon", concept))
                .await
            {
                Ok(Some(url)) => return url,
                Ok(None) => {}
                Err(e) => debug!("Generic image search for {:?} failed: {}", concept, e),
            }
        }

        // Tier 4: placeholder
        PLACEHOLDER_IMAGE_URL.to_string()
    }

    /// Search the pictogram provider with every term in parallel and
    /// pick the best-scored candidate. Aggregation follows term order,
    /// not completion order, so ranking is deterministic. Returns
    /// `None` when nothing scores above zero: a zero-score "best" is
    /// no better than a generic first hit, so the tier falls through.
    async fn best_pictogram(&self, terms: &[String]) -> Option<String> {
        let wanted: Vec<String> = terms
            .iter()
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect();
        if wanted.is_empty() {
            return None;
        }

        let searches = join_all(wanted.iter().map(|term| self.pictograms.search(term))).await;

        let mut candidates: Vec<Pictogram> = Vec::new();
        for (term, result) in wanted.iter().zip(searches) {
            match result {
                Ok(mut list) => {
                    list.truncate(MAX_RESULTS_PER_TERM);
                    candidates.extend(list);
                }
                Err(e) => debug!("Pictogram search for {:?} failed: {}", term, e),
            }
        }
        if candidates.is_empty() {
            return None;
        }

        // Stable sort: equal scores keep discovery order.
        let mut ranked: Vec<(i64, &Pictogram)> = candidates
            .iter()
            .map(|c| (score_candidate(c, &wanted), c))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        let (best_score, best) = ranked[0];
        if best_score <= 0 {
            return None;
        }
        Some(best.image_url.clone())
    }
}

/// Score one candidate against the normalized search terms: +100 for
/// an exact keyword match, otherwise +20 when the term and any keyword
/// contain one another, summed across terms.
fn score_candidate(candidate: &Pictogram, wanted_terms: &[String]) -> i64 {
    let mut score = 0;
    for term in wanted_terms {
        if candidate.keywords.iter().any(|kw| kw == term) {
            score += SCORE_EXACT;
        } else if candidate
            .keywords
            .iter()
            .any(|kw| kw.contains(term.as_str()) || term.contains(kw.as_str()))
        {
            score += SCORE_PARTIAL;
        }
    }
    score
}
