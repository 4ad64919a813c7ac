//! Memoized, fault-tolerant translation resolver
//!
//! `translate` never fails: English is the identity, cache hits are
//! returned as-is, and any provider error yields the untranslated
//! concept. Only successful translations are cached, so a transient
//! provider outage does not pin the fallback for the process lifetime.

use std::sync::Arc;
use tracing::debug;

use aac_common::{normalize, ShardedCache};

use crate::providers::TranslateProvider;

const SOURCE_LANG: &str = "en";

pub struct TranslationResolver {
    cache: ShardedCache,
    provider: Arc<dyn TranslateProvider>,
}

impl TranslationResolver {
    pub fn new(provider: Arc<dyn TranslateProvider>) -> Self {
        Self {
            cache: ShardedCache::new(),
            provider,
        }
    }

    /// Translate `concept` into `lang`, falling back to the original
    /// concept on any provider failure.
    pub async fn translate(&self, concept: &str, lang: &str) -> String {
        if lang == SOURCE_LANG {
            return concept.to_string();
        }

        let key = cache_key(concept, lang);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        match self.provider.translate(concept, lang, SOURCE_LANG).await {
            Ok(translated) => {
                self.cache.insert(&key, translated.clone());
                translated
            }
            Err(e) => {
                debug!("Translation of {:?} to {} failed: {}", concept, lang, e);
                concept.to_string()
            }
        }
    }
}

fn cache_key(concept: &str, lang: &str) -> String {
    format!("{}|{}", normalize(concept), lang)
}
