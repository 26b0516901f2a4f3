use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// JSON-RPC envelope (DAS API)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: &'a str,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(id: &'a str, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

// ---------------------------------------------------------------------------
// getAssetsByOwner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByOwnerParams<'a> {
    pub owner_address: &'a str,
    pub page: u32,
    pub limit: u32,
    pub display_options: DisplayOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_fungible: bool,
}

/// Items are kept as raw JSON and parsed per entry by the holdings
/// normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub items: Vec<Value>,
}
