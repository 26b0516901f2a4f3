use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::http::{send_json, RetryPolicy};
use crate::errors::RetrievalError;
use crate::ingestion::TransactionSource;
use crate::models::Transaction;

const HELIUS_API_BASE: &str = "https://api.helius.xyz";

/// Client for the Helius enhanced transactions API.
#[derive(Debug, Clone)]
pub struct TransactionsClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl TransactionsClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: HELIUS_API_BASE.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch one page of parsed transactions for `wallet`, newest first.
    pub async fn get_transactions(
        &self,
        wallet: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>, RetrievalError> {
        let limit = limit.to_string();
        let mut params: Vec<(&str, &str)> =
            vec![("api-key", self.api_key.as_str()), ("limit", limit.as_str())];
        if let Some(sig) = before {
            params.push(("before", sig));
        }
        let url = Url::parse_with_params(
            &format!("{}/v0/addresses/{}/transactions", self.base_url, wallet),
            &params,
        )
        .map_err(|e| RetrievalError::InvalidUrl(e.to_string()))?;

        send_json(self.retry, "helius transactions", || {
            self.http.get(url.clone()).timeout(self.timeout)
        })
        .await
    }
}

#[async_trait]
impl TransactionSource for TransactionsClient {
    async fn fetch_page(
        &self,
        wallet: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>, RetrievalError> {
        self.get_transactions(wallet, before, limit).await
    }
}
