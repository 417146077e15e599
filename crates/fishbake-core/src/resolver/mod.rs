//! Turns a species' names into a baked photo URL.
//!
//! Lookup order is the scientific title (`Genus_species`) and then the
//! common name. A summary thumbnail that looks like a range map triggers a
//! media-list lookup for the same title; if that finds nothing usable the
//! resolver moves on to the next title instead of keeping the map.

mod endpoints;
mod wire;

pub use endpoints::Endpoints;
pub use wire::{MediaList, Summary, Thumbnail};

use crate::config::FishbakeConfig;
use crate::http::JsonFetch;
use crate::image::{is_likely_map, pick_best_image, rewrite_width, DEFAULT_THUMBNAIL_WIDTH};

/// Lookup titles in query order. Degenerate titles (missing names) are left out.
pub fn lookup_titles(genus: &str, species: &str, common_name: &str) -> Vec<String> {
    let mut titles = Vec::with_capacity(2);
    if !genus.is_empty() && !species.is_empty() {
        titles.push(format!("{}_{}", genus, species));
    }
    if !common_name.is_empty() {
        titles.push(common_name.replace(' ', "_"));
    }
    titles
}

/// Resolves species to image URLs through a [`JsonFetch`] transport.
#[derive(Debug, Clone)]
pub struct ImageResolver<F> {
    fetch: F,
    endpoints: Endpoints,
    width: u32,
}

impl<F: JsonFetch> ImageResolver<F> {
    pub fn new(fetch: F, endpoints: Endpoints) -> Self {
        Self {
            fetch,
            endpoints,
            width: DEFAULT_THUMBNAIL_WIDTH,
        }
    }

    pub fn from_config(fetch: F, cfg: &FishbakeConfig) -> Self {
        Self::new(
            fetch,
            Endpoints::new(&cfg.summary_endpoint, &cfg.media_list_endpoint),
        )
        .with_width(cfg.thumbnail_width)
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Returns a photographic URL, or `None` when no title yields one.
    pub fn resolve(&self, genus: &str, species: &str, common_name: &str) -> Option<String> {
        for title in lookup_titles(genus, species, common_name) {
            if let Some(url) = self.resolve_title(&title) {
                tracing::debug!("{} -> {}", title, url);
                return Some(url);
            }
        }
        tracing::debug!("no image for {} {} ({})", genus, species, common_name);
        None
    }

    fn resolve_title(&self, title: &str) -> Option<String> {
        let summary: Summary = self
            .fetch
            .get_json(&self.endpoints.summary_url(title))
            .and_then(|v| serde_json::from_value(v).ok())?;
        let thumb = rewrite_width(summary.thumbnail_source()?, self.width);
        if !is_likely_map(&thumb) {
            return Some(thumb);
        }

        tracing::debug!("{}: thumbnail looks like a map, checking media list", title);
        let media: MediaList = self
            .fetch
            .get_json(&self.endpoints.media_list_url(title))
            .and_then(|v| serde_json::from_value(v).ok())?;
        let items = media.items.unwrap_or_default();
        if items.is_empty() {
            return None;
        }
        pick_best_image(&items, self.width)
    }
}
