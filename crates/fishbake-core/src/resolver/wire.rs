//! Response shapes of the two endpoints. Everything is optional; missing
//! fields mean "no data", not an error.

use serde::Deserialize;

use crate::image::MediaItem;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub source: Option<String>,
}

impl Summary {
    pub fn thumbnail_source(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()?
            .source
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaList {
    #[serde(default)]
    pub items: Option<Vec<MediaItem>>,
}
