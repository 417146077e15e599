/// Base URLs of the summary and media-list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    summary: String,
    media_list: String,
}

impl Endpoints {
    /// Bases are used as prefixes; a trailing `/` is added if missing.
    pub fn new(summary: &str, media_list: &str) -> Self {
        Self {
            summary: with_trailing_slash(summary),
            media_list: with_trailing_slash(media_list),
        }
    }

    pub fn summary_url(&self, title: &str) -> String {
        format!("{}{}", self.summary, urlencoding::encode(title))
    }

    pub fn media_list_url(&self, title: &str) -> String {
        format!("{}{}", self.media_list, urlencoding::encode(title))
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}
