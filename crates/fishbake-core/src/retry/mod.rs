//! Retry policy for encyclopedia requests.
//!
//! Classifies transport failures and HTTP statuses into error kinds and
//! decides whether another attempt is worth a fixed pause. Everything that
//! is not retried surfaces to the resolver as "no data".

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
