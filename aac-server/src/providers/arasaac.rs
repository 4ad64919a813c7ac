//! ARASAAC pictogram search client
//!
//! ARASAAC returns keyword lists in two shapes, plain strings or
//! records with a `keyword` field. Both are flattened to normalized
//! strings here so scoring never sees the raw representation.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use aac_common::normalize;

use super::{Pictogram, PictogramProvider, ProviderError};

const ARASAAC_SEARCH_BASE: &str = "https://api.arasaac.org/api/pictograms/en/search";
const ARASAAC_STATIC_BASE: &str = "https://static.arasaac.org/pictograms";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Raw search result item
#[derive(Debug, Deserialize)]
struct RawPictogram {
    #[serde(rename = "_id")]
    id: i64,
    #[serde(default)]
    keywords: Vec<RawKeyword>,
}

/// Keyword entries arrive as `"eat"` or `{"keyword": "eat", ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKeyword {
    Plain(String),
    Tagged {
        #[serde(default)]
        keyword: Option<String>,
    },
    Other(serde_json::Value),
}

impl RawKeyword {
    fn into_normalized(self) -> Option<String> {
        let raw = match self {
            RawKeyword::Plain(s) => s,
            RawKeyword::Tagged { keyword } => keyword?,
            RawKeyword::Other(_) => return None,
        };
        let norm = normalize(&raw);
        if norm.is_empty() {
            None
        } else {
            Some(norm)
        }
    }
}

pub struct ArasaacClient {
    client: reqwest::Client,
}

impl ArasaacClient {
    pub fn new() -> aac_common::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| aac_common::Error::Config(format!("pictogram client: {}", e)))?;
        Ok(Self { client })
    }

    fn search_url(term: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(ARASAAC_SEARCH_BASE)
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Parse("bad base URL".to_string()))?
            .push(term);
        Ok(url)
    }

    /// 500px static PNG for a pictogram id.
    fn png_url(id: i64) -> String {
        format!("{}/{}/{}_500.png", ARASAAC_STATIC_BASE, id, id)
    }
}

#[async_trait]
impl PictogramProvider for ArasaacClient {
    async fn search(&self, term: &str) -> Result<Vec<Pictogram>, ProviderError> {
        let url = Self::search_url(term)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            // 404 is ARASAAC's "no results", not a failure
            if status.as_u16() == 404 {
                return Ok(Vec::new());
            }
            return Err(ProviderError::Api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown").to_string(),
            ));
        }

        let raw: Vec<RawPictogram> = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(raw
            .into_iter()
            .map(|item| Pictogram {
                id: item.id,
                keywords: item
                    .keywords
                    .into_iter()
                    .filter_map(RawKeyword::into_normalized)
                    .collect(),
                image_url: Self::png_url(item.id),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_percent_encodes_term() {
        let url = ArasaacClient::search_url("hot dog").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.arasaac.org/api/pictograms/en/search/hot%20dog"
        );
    }

    #[test]
    fn png_url_repeats_id() {
        assert_eq!(
            ArasaacClient::png_url(2462),
            "https://static.arasaac.org/pictograms/2462/2462_500.png"
        );
    }

    #[test]
    fn keywords_flatten_both_shapes() {
        let json = r#"[
            {"_id": 1, "keywords": ["Eat", {"keyword": " Food "}, {"type": 2}, {"keyword": ""}]},
            {"_id": 2}
        ]"#;
        let raw: Vec<RawPictogram> = serde_json::from_str(json).unwrap();
        let normalized: Vec<Vec<String>> = raw
            .into_iter()
            .map(|p| {
                p.keywords
                    .into_iter()
                    .filter_map(RawKeyword::into_normalized)
                    .collect()
            })
            .collect();
        assert_eq!(normalized[0], vec!["eat", "food"]);
        assert!(normalized[1].is_empty());
    }
}
