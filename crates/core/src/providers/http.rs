use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::CoreError;

/// Retry configuration for outbound requests.
///
/// Both knobs are configuration rather than constants so tests can run
/// with a zero base delay instead of real wall-clock waits.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first one.
    pub max_attempts: u32,

    /// Backoff before the next attempt is `base_delay × 2^attempt`,
    /// attempt-indexed from 0.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Run `op` with bounded retry and exponential backoff.
///
/// Only transient errors are retried. A decode failure indicates a
/// contract mismatch with the remote side and aborts immediately, since
/// repeating the request cannot fix it. Exhausting the budget yields
/// `RetriesExhausted` carrying the last underlying error.
///
/// Waits are `tokio::time::sleep`, so other in-flight fetches keep
/// making progress while one of them backs off.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    let mut last = None;
    for attempt in 0..policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) => {
                warn!(attempt, error = %e, "request attempt failed");
                last = Some(e);
                if attempt + 1 < policy.max_attempts {
                    let delay = policy.base_delay.saturating_mul(2u32.saturating_pow(attempt));
                    debug!(?delay, "backing off before retry");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(CoreError::RetriesExhausted {
        attempts: policy.max_attempts,
        last: last
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempt was made".to_string()),
    })
}

/// Thin JSON-over-HTTP client with bearer authentication and the retry
/// behavior above. Every broker endpoint goes through this.
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn new(policy: RetryPolicy) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, policy }
    }

    /// Bearer-authenticated GET decoded as JSON.
    ///
    /// Transport failures and non-2xx statuses are transient and retried
    /// per the policy; a body that fails decoding fails immediately.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<T, CoreError> {
        retry(&self.policy, || self.fetch_once(url, credential)).await
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<T, CoreError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(credential)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
