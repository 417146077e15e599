//! Blocking JSON GET against the encyclopedia endpoints.
//!
//! The resolver only depends on [`JsonFetch`]; [`CurlFetcher`] is the real
//! transport. Failures never escape as errors: a request that cannot produce
//! a JSON document yields `None`.

mod get;

pub use get::CurlFetcher;

use serde_json::Value;

/// Source of JSON documents keyed by absolute URL.
pub trait JsonFetch {
    /// Returns the decoded body, or `None` for any failure (after retries).
    fn get_json(&self, url: &str) -> Option<Value>;
}

impl<T: JsonFetch + ?Sized> JsonFetch for &T {
    fn get_json(&self, url: &str) -> Option<Value> {
        (**self).get_json(url)
    }
}
