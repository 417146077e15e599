//! Map-image heuristic and candidate selection.
//!
//! Range maps, distribution maps and conservation-status icons are common
//! lead images on species pages. They are recognised purely by filename: a
//! fixed keyword list plus the `.svg` extension. Downstream data was baked
//! with exactly this list, so it stays as is.

mod select;

pub use select::{pick_best_image, MediaItem, SrcsetEntry};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Width used for every baked thumbnail unless configured otherwise.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 480;

/// Lower-case substrings that mark an image as a map or status icon.
pub const MAP_KEYWORDS: &[&str] = &[
    "distmap",
    "distribution",
    "distribut",
    "range_map",
    "_range.",
    "_map.",
    "iucn",
    "status_iucn",
    "conservation",
    "cypron-range",
];

static WIDTH_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\d+px-").expect("static width pattern"));

/// True if the URL (or file title) looks like a range map rather than a photo.
pub fn is_likely_map(url: &str) -> bool {
    let lower = url.to_lowercase();
    if lower.ends_with(".svg") {
        return true;
    }
    MAP_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Rewrites every `/NNpx-` path segment to `/{width}px-`.
pub fn rewrite_width(url: &str, width: u32) -> String {
    let replacement = format!("/{}px-", width);
    WIDTH_SEGMENT
        .replace_all(url, NoExpand(&replacement))
        .into_owned()
}

/// Turns `//host/path` into `https://host/path`; other URLs pass through.
pub fn normalize_protocol(url: &str) -> String {
    match url.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// One image considered for a species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub source_url: String,
    pub title: String,
    pub is_map: bool,
}

impl ImageCandidate {
    pub fn new(source_url: impl Into<String>, title: impl Into<String>) -> Self {
        let source_url = source_url.into();
        let is_map = is_likely_map(&source_url);
        Self {
            source_url,
            title: title.into(),
            is_map,
        }
    }
}
