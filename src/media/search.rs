use std::collections::HashMap;
use std::env;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://api.pexels.com/v1/search";
const API_KEY_VAR: &str = "PEXELS_API_KEY";
const ENDPOINT_VAR: &str = "IMAGE_SEARCH_ENDPOINT";

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image provider returned an error: {status}")]
    ServerError { status: u16 },
}

/// What the deck needs back from a search: a usable URL plus alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub orientation: String,
    pub per_page: u32,
    pub size: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            orientation: String::from("landscape"),
            per_page: 1,
            size: String::from("large"),
        }
    }
}

/// Query-to-image collaborator. Results are cached per query; a missing
/// API key downgrades every search to a warned-once `None` so hosts can
/// fall back to placeholder visuals.
pub struct ImageSearchClient {
    api_key: Option<String>,
    endpoint: String,
    options: SearchOptions,
    cache: HashMap<String, Option<ImageResult>>,
    missing_key_warned: bool,
}

impl ImageSearchClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            endpoint: String::from(DEFAULT_ENDPOINT),
            options: SearchOptions::default(),
            cache: HashMap::new(),
            missing_key_warned: false,
        }
    }

    /// Reads `PEXELS_API_KEY` and the optional endpoint override from the
    /// environment.
    pub fn from_env() -> Self {
        let mut client = Self::new(env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()));
        if let Ok(endpoint) = env::var(ENDPOINT_VAR) {
            if !endpoint.is_empty() {
                client.endpoint = endpoint;
            }
        }
        client
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn cache_key(&self, query: &str) -> String {
        format!(
            "{}__{}_{}_{}",
            query, self.options.orientation, self.options.per_page, self.options.size
        )
    }

    /// Looks one image up for the query. `Ok(None)` means the provider had
    /// no match or no API key is configured; callers degrade to a
    /// placeholder either way.
    pub fn search(&mut self, query: &str) -> anyhow::Result<Option<ImageResult>> {
        let Some(api_key) = self.api_key.clone() else {
            if !self.missing_key_warned {
                log::warn!(
                    "Image search API key is not configured. Provide {} to enable image search.",
                    API_KEY_VAR
                );
                self.missing_key_warned = true;
            }
            return Ok(None);
        };

        let cache_key = self.cache_key(query);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached.clone());
        }

        let response = ureq::get(&self.endpoint)
            .query("query", query)
            .query("per_page", &self.options.per_page.to_string())
            .query("orientation", &self.options.orientation)
            .query("size", &self.options.size)
            .set("Authorization", &api_key)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => RequestError::ServerError { status: code },
                other => RequestError::Http(other),
            })
            .context("Failed to send image search request")?;

        let body: serde_json::Value = response
            .into_json()
            .context("Failed to read image search response body")?;

        let result = body
            .get("photos")
            .and_then(|p| p.as_array())
            .and_then(|photos| photos.first())
            .and_then(|photo| {
                let url = photo
                    .get("src")
                    .and_then(|src| src.get(self.options.size.as_str()))
                    .and_then(|u| u.as_str())?;
                let alt = photo.get("alt").and_then(|a| a.as_str()).unwrap_or(query);
                Some(ImageResult {
                    url: url.to_string(),
                    alt: alt.to_string(),
                })
            });

        self.cache.insert(cache_key, result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_returns_none() {
        let mut client = ImageSearchClient::new(None);
        assert!(!client.has_api_key());
        assert!(client.search("classroom").unwrap().is_none());
        // the warning latch only fires once; a second call is still None
        assert!(client.search("classroom").unwrap().is_none());
        assert!(client.missing_key_warned);
    }

    #[test]
    fn test_cache_key_includes_options() {
        let portrait = ImageSearchClient::new(None).with_options(SearchOptions {
            orientation: String::from("portrait"),
            per_page: 3,
            size: String::from("medium"),
        });
        let landscape = ImageSearchClient::new(None);
        assert_ne!(portrait.cache_key("sea"), landscape.cache_key("sea"));
    }
}
