//! Google Custom Search image client (tier-3 fallback)
//!
//! Optional: only active when `GOOGLE_SEARCH_API_KEY` and
//! `GOOGLE_SEARCH_CX` are set. Without credentials the image resolver
//! skips this tier entirely.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{ImageSearchProvider, ProviderError};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

pub struct GoogleImageClient {
    client: reqwest::Client,
    credentials: Option<(String, String)>,
}

impl GoogleImageClient {
    /// Reads `GOOGLE_SEARCH_API_KEY` / `GOOGLE_SEARCH_CX` from the
    /// environment. Absence is not an error.
    pub fn from_env() -> aac_common::Result<Self> {
        let credentials = match (
            std::env::var("GOOGLE_SEARCH_API_KEY"),
            std::env::var("GOOGLE_SEARCH_CX"),
        ) {
            (Ok(key), Ok(cx)) if !key.is_empty() && !cx.is_empty() => Some((key, cx)),
            _ => None,
        };

        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| aac_common::Error::Config(format!("image search client: {}", e)))?;
        Ok(Self {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl ImageSearchProvider for GoogleImageClient {
    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn search_image(&self, query: &str) -> Result<Option<String>, ProviderError> {
        let (key, cx) = match &self.credentials {
            Some(creds) => creds,
            None => return Err(ProviderError::NotConfigured),
        };

        let response = self
            .client
            .get(CUSTOM_SEARCH_URL)
            .query(&[
                ("key", key.as_str()),
                ("cx", cx.as_str()),
                ("q", query),
                ("searchType", "image"),
                ("num", "1"),
                ("safe", "active"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown").to_string(),
            ));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(data.items.into_iter().find_map(|item| item.link))
    }
}
