//! External provider adapters
//!
//! Each external collaborator (pictogram search, generic image search,
//! translation, speech synthesis) is consumed through one normalized
//! trait. Loosely-typed provider responses are reshaped into typed
//! structs at this boundary so the pipeline stays provider-agnostic.
//! Every adapter fails soft: errors here trigger fallback in the
//! resolvers and never surface to an HTTP caller (speech synthesis is
//! the one exception, see `api::speak`).

use async_trait::async_trait;
use thiserror::Error;

pub mod arasaac;
pub mod google_images;
pub mod google_translate;
pub mod google_tts;

pub use arasaac::ArasaacClient;
pub use google_images::GoogleImageClient;
pub use google_translate::GoogleTranslateClient;
pub use google_tts::GoogleTtsClient;

/// Provider adapter errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider not configured")]
    NotConfigured,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Network(e.to_string())
    }
}

/// One pictogram search result, keywords already normalized
/// (trimmed, lowercased, empties dropped).
#[derive(Debug, Clone)]
pub struct Pictogram {
    pub id: i64,
    pub keywords: Vec<String>,
    pub image_url: String,
}

/// Pictogram search: `term -> list of {id, keywords, image_url}`.
#[async_trait]
pub trait PictogramProvider: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<Pictogram>, ProviderError>;
}

/// General-purpose image search used as the tier-3 fallback.
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// Whether credentials are present. Unconfigured providers cause
    /// the tier to be skipped, not treated as an error.
    fn is_configured(&self) -> bool;

    /// `Ok(None)` means the provider answered with no results.
    async fn search_image(&self, query: &str) -> Result<Option<String>, ProviderError>;
}

/// Text translation: `(text, target_lang, source_lang) -> text`.
#[async_trait]
pub trait TranslateProvider: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, ProviderError>;
}

/// Speech synthesis: `(text, locale_tag) -> MP3 bytes`.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, text: &str, locale: &str) -> Result<Vec<u8>, ProviderError>;
}
