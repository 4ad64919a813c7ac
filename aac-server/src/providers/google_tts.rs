//! Google Cloud Text-to-Speech client
//!
//! Synthesizes MP3 audio for a label in its speech locale. Unlike the
//! pipeline resolvers there is no placeholder to degrade to, so errors
//! propagate to the `/aac/speak` handler and become a 502.

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{ProviderError, SpeechProvider};

const TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
const TTS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TtsResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

pub struct GoogleTtsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleTtsClient {
    /// Reads `GOOGLE_TTS_API_KEY` from the environment.
    pub fn from_env() -> aac_common::Result<Self> {
        let api_key = std::env::var("GOOGLE_TTS_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let client = reqwest::Client::builder()
            .timeout(TTS_TIMEOUT)
            .build()
            .map_err(|e| aac_common::Error::Config(format!("tts client: {}", e)))?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl SpeechProvider for GoogleTtsClient {
    async fn synthesize(&self, text: &str, locale: &str) -> Result<Vec<u8>, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;

        let response = self
            .client
            .post(TTS_URL)
            .query(&[("key", api_key.as_str())])
            .json(&json!({
                "input": { "text": text },
                "voice": { "languageCode": locale, "ssmlGender": "NEUTRAL" },
                "audioConfig": { "audioEncoding": "MP3" },
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

        let data: TtsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        base64::engine::general_purpose::STANDARD
            .decode(data.audio_content)
            .map_err(|e| ProviderError::Parse(format!("audio content: {}", e)))
    }
}
