use serde::{Deserialize, Serialize};

/// Subset of the Jupiter v6 `/quote` response the price oracle reads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default)]
    pub input_mint: Option<String>,
    #[serde(default)]
    pub in_amount: Option<String>,
    #[serde(default)]
    pub output_mint: Option<String>,
    /// Raw output amount (lamports when quoting into SOL), as a string.
    #[serde(default)]
    pub out_amount: Option<String>,
    #[serde(default)]
    pub slippage_bps: Option<u64>,
    #[serde(default)]
    pub price_impact_pct: Option<String>,
    #[serde(default)]
    pub route_plan: Vec<serde_json::Value>,
}

/// Error body returned when no route exists, e.g.
/// `{"error":"Could not find any route","errorCode":"COULD_NOT_FIND_ANY_ROUTE"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
