//! Shared HTTP transport.
//!
//! Performs exactly one request/response cycle per call under a
//! caller-supplied wall-clock timeout and classifies the outcome: success
//! with body, timeout, or connection/other failure. There is no retry logic
//! anywhere in this crate.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use crate::error::BenchError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
///
/// The client carries no global timeout; the per-call deadline is applied
/// per request so each run's configured value is honored.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .build()
            .expect("Failed to build HTTP client")
    })
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn classify(e: reqwest::Error, timeout: Duration) -> BenchError {
    if e.is_timeout() {
        BenchError::Timeout(timeout.as_millis() as u64)
    } else {
        BenchError::Network(e)
    }
}

/// POST a JSON body and return the parsed JSON response.
///
/// Non-2xx statuses become [`BenchError::Api`] with the body text attached;
/// an unparseable success body becomes [`BenchError::Parse`].
pub async fn post_json(
    url: &str,
    body: &serde_json::Value,
    timeout: Duration,
) -> Result<serde_json::Value, BenchError> {
    let resp = shared_client()
        .post(url)
        .headers(json_headers())
        .timeout(timeout)
        .json(body)
        .send()
        .await
        .map_err(|e| classify(e, timeout))?;

    let status = resp.status().as_u16();
    let text = resp.text().await.map_err(|e| classify(e, timeout))?;
    if !(200..300).contains(&status) {
        return Err(BenchError::api(status, text));
    }

    serde_json::from_str(&text)
        .map_err(|e| BenchError::Parse(format!("invalid JSON body: {e}")))
}

/// GET a URL and report whether it answered with a success status.
///
/// Used only for availability probes; the body is discarded.
pub async fn get_ok(url: &str, timeout: Duration) -> bool {
    match shared_client().get(url).timeout(timeout).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}
