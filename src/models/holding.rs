use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The wallet's current position in one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub mint: String,
    /// `raw_balance / 10^decimals`
    pub balance: Decimal,
    pub raw_balance: u64,
    pub decimals: u32,
}
