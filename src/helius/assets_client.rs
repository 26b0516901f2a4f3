use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use super::http::{send_json, RetryPolicy};
use super::types::{AssetList, AssetsByOwnerParams, DisplayOptions, RpcRequest, RpcResponse};
use crate::errors::RetrievalError;
use crate::ingestion::AssetSource;

const HELIUS_RPC_BASE: &str = "https://mainnet.helius-rpc.com";

/// DAS caps a single page at 1000 items.
const ASSETS_PAGE_LIMIT: u32 = 1000;

/// Client for the Helius DAS RPC (`getAssetsByOwner`).
#[derive(Debug, Clone)]
pub struct AssetsClient {
    http: Client,
    rpc_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl AssetsClient {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            rpc_url: HELIUS_RPC_BASE.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
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

    /// Fetch the first page of fungible and non-fungible assets owned by
    /// `wallet`, unparsed.
    pub async fn get_assets_by_owner(&self, wallet: &str) -> Result<Vec<Value>, RetrievalError> {
        let body = RpcRequest::new(
            "get-assets",
            "getAssetsByOwner",
            AssetsByOwnerParams {
                owner_address: wallet,
                page: 1,
                limit: ASSETS_PAGE_LIMIT,
                display_options: DisplayOptions { show_fungible: true },
            },
        );

        let url = Url::parse_with_params(&self.rpc_url, &[("api-key", self.api_key.as_str())])
            .map_err(|e| RetrievalError::InvalidUrl(e.to_string()))?;

        let resp: RpcResponse<AssetList> = send_json(self.retry, "helius getAssetsByOwner", || {
            self.http.post(url.clone()).json(&body).timeout(self.timeout)
        })
        .await?;

        into_items(resp)
    }
}

fn into_items(resp: RpcResponse<AssetList>) -> Result<Vec<Value>, RetrievalError> {
    if let Some(err) = resp.error {
        return Err(RetrievalError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    let list = resp.result.map(|r| r.items).unwrap_or_default();
    if list.len() as u32 >= ASSETS_PAGE_LIMIT {
        tracing::warn!(
            items = list.len(),
            "Asset page is full; holdings beyond the first page are not included"
        );
    }
    Ok(list)
}

#[async_trait]
impl AssetSource for AssetsClient {
    async fn fetch_assets(&self, wallet: &str) -> Result<Vec<Value>, RetrievalError> {
        self.get_assets_by_owner(wallet).await
    }
}
