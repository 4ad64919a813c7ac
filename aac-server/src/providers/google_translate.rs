//! Google Cloud Translation v2 client
//!
//! One normalized `(text, target_lang, source_lang) -> text` operation.
//! The translation resolver swallows every error from this adapter and
//! falls back to the untranslated concept, so failures here only cost
//! translation quality, never a request.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{ProviderError, TranslateProvider};

const TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct GoogleTranslateClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleTranslateClient {
    /// Reads `GOOGLE_TRANSLATE_API_KEY` from the environment. Without
    /// a key every call errors and the resolver falls back.
    pub fn from_env() -> aac_common::Result<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let client = reqwest::Client::builder()
            .timeout(TRANSLATE_TIMEOUT)
            .build()
            .map_err(|e| aac_common::Error::Config(format!("translate client: {}", e)))?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl TranslateProvider for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;

        let response = self
            .client
            .post(TRANSLATE_URL)
            .query(&[("key", api_key.as_str())])
            .json(&json!({
                "q": text,
                "target": target_lang,
                "source": source_lang,
                "format": "text",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown").to_string(),
            ));
        }

        let data: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        data.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| ProviderError::Parse("empty translations list".to_string()))
    }
}
