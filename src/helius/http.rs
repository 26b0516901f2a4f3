use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::errors::RetrievalError;

const BASE_RETRY_DELAY: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Longest error body kept in `RetrievalError::Status`.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: BASE_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        (self.base_delay * 2u32.saturating_pow(attempt)).min(MAX_RETRY_DELAY)
    }
}

/// Send the request built by `build` and decode a JSON body, retrying
/// transient failures with exponential backoff.
pub async fn send_json<T, F>(
    policy: RetryPolicy,
    what: &str,
    build: F,
) -> Result<T, RetrievalError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let mut attempt: u32 = 0;

    loop {
        match send_once(build()).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.max_retries => {
                let delay = policy.delay(attempt);
                attempt += 1;
                tracing::warn!(
                    error = %e,
                    request = what,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying"
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn send_once<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, RetrievalError> {
    let resp = req.send().await?;
    let status = resp.status();

    if !status.is_success() {
        let mut body = resp.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        return Err(RetrievalError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
