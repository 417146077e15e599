//! libcurl transport for [`JsonFetch`](super::JsonFetch).

use serde_json::Value;
use std::time::Duration;

use super::JsonFetch;
use crate::config::FishbakeConfig;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// Performs one GET per attempt with a fresh easy handle.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            retry,
        }
    }

    pub fn from_config(cfg: &FishbakeConfig) -> Self {
        Self::new(
            cfg.user_agent.clone(),
            cfg.request_timeout(),
            cfg.retry_policy(),
        )
    }

    /// Single attempt: transport errors, non-200 statuses and bad JSON are all errors here.
    fn get_once(&self, url: &str) -> Result<Value, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl JsonFetch for CurlFetcher {
    fn get_json(&self, url: &str) -> Option<Value> {
        match run_with_retry(&self.retry, || self.get_once(url)) {
            Ok(v) => {
                tracing::debug!("GET {} ok", url);
                Some(v)
            }
            Err(FetchError::Http(404)) => {
                tracing::debug!("GET {} not found", url);
                None
            }
            Err(e) => {
                tracing::warn!("GET {} gave up: {}", url, e);
                None
            }
        }
    }
}
