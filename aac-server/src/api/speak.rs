//! Speech synthesis endpoint
//!
//! Synthesizes a label in its speech locale. There is no placeholder
//! audio to degrade to, so provider failures surface as 502 here; the
//! frontend falls back to on-device speech synthesis.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::pipeline::tts_locale_for_lang;
use crate::AppState;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,

    /// Language code; mapped to a speech locale the same way tiles are.
    #[serde(default)]
    pub lang: String,
}

/// POST /aac/speak -> MP3 bytes
pub async fn post_speak(
    State(state): State<AppState>,
    Json(request): Json<SpeakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::InvalidParam("text must not be empty".to_string()));
    }

    let locale = tts_locale_for_lang(&request.lang);
    let audio = state
        .speech
        .synthesize(&request.text, locale)
        .await
        .map_err(|e| {
            warn!("Speech synthesis failed for locale {}: {}", locale, e);
            ApiError::Provider(e.to_string())
        })?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}
