//! Choose the first photographic image from a media list.

use serde::Deserialize;

use super::{normalize_protocol, rewrite_width, ImageCandidate};

/// One entry of the media-list `items` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaItem {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub srcset: Option<Vec<SrcsetEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SrcsetEntry {
    #[serde(default)]
    pub src: Option<String>,
}

impl MediaItem {
    /// The first srcset source wrapped as a candidate, if this item is a usable image.
    fn candidate(&self) -> Option<ImageCandidate> {
        if self.kind.as_deref() != Some("image") {
            return None;
        }
        let src = self
            .srcset
            .as_ref()?
            .first()?
            .src
            .as_deref()
            .filter(|s| !s.is_empty())?;
        Some(ImageCandidate::new(src, self.title.clone().unwrap_or_default()))
    }
}

/// Returns the first non-map, non-SVG image, normalized to https and `width`px.
pub fn pick_best_image(items: &[MediaItem], width: u32) -> Option<String> {
    items.iter().find_map(|item| {
        let candidate = item.candidate()?;
        if candidate.title.to_lowercase().ends_with(".svg") || candidate.is_map {
            return None;
        }
        Some(rewrite_width(&normalize_protocol(&candidate.source_url), width))
    })
}
