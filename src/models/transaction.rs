use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One enhanced transaction as returned by the indexer. Read-only; keyed
/// by `signature`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub signature: String,
    #[serde(default)]
    pub token_transfers: Vec<Transfer>,
    /// Block time in unix seconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, rename = "type")]
    pub tx_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A single token movement inside a transaction. `token_amount` is already
/// scaled to the token's natural unit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(default)]
    pub mint: String,
    #[serde(default)]
    pub token_amount: Decimal,
    #[serde(default)]
    pub from_user_account: Option<String>,
    #[serde(default)]
    pub to_user_account: Option<String>,
}

impl Transfer {
    pub fn is_from(&self, wallet: &str) -> bool {
        self.from_user_account.as_deref() == Some(wallet)
    }

    pub fn is_to(&self, wallet: &str) -> bool {
        self.to_user_account.as_deref() == Some(wallet)
    }
}
