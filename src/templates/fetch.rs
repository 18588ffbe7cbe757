use std::collections::HashMap;

use anyhow::Context;
use thiserror::Error;

use super::pack::TemplatePack;

#[derive(Error, Debug)]
enum RequestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Server returned an error: {status}")]
    ServerError { status: u16 },
}

/// Fetches a template pack from a pack URL. Requests run one at a time;
/// callers wanting reuse go through `TemplateCache`.
pub fn fetch_template_pack(url: &str) -> anyhow::Result<TemplatePack> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, _) => RequestError::ServerError { status: code },
            other => RequestError::Http(other),
        })
        .context("Failed to send template pack request")?;

    let pack: TemplatePack = response
        .into_json()
        .context("Failed to read template pack body")?;

    Ok(pack)
}

/// Per-URL cache so repeated template insertions fetch each pack once.
#[derive(Default)]
pub struct TemplateCache {
    packs: HashMap<String, TemplatePack>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, url: &str) -> anyhow::Result<&TemplatePack> {
        if !self.packs.contains_key(url) {
            let pack = fetch_template_pack(url)
                .with_context(|| format!("could not fetch template pack from {}", url))?;
            log::info!("Fetched template pack from {}", url);
            self.packs.insert(url.to_string(), pack);
        }
        Ok(&self.packs[url])
    }

    /// Seeds the cache without a network round trip.
    pub fn insert(&mut self, url: impl Into<String>, pack: TemplatePack) {
        self.packs.insert(url.into(), pack);
    }

    pub fn is_cached(&self, url: &str) -> bool {
        self.packs.contains_key(url)
    }
}
