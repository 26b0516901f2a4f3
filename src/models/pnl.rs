use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PriceUnavailable;

// ---------------------------------------------------------------------------
// CostBasis
// ---------------------------------------------------------------------------

/// Implied purchase price of a token, taken from the first transaction in
/// which the wallet both sent SOL and received the token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBasis {
    pub mint: String,
    /// SOL per token.
    pub price_per_unit: Decimal,
    pub signature: String,
    pub sol_spent: Decimal,
    pub tokens_received: Decimal,
}

// ---------------------------------------------------------------------------
// PnlStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PnlStatus {
    Pending,
    NoCostBasisFound,
    NoCurrentPriceFound,
    Profit,
    Loss,
}

impl PnlStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PnlStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PnlStatus::Pending => "pending",
            PnlStatus::NoCostBasisFound => "no_cost_basis_found",
            PnlStatus::NoCurrentPriceFound => "no_current_price_found",
            PnlStatus::Profit => "profit",
            PnlStatus::Loss => "loss",
        }
    }
}

impl fmt::Display for PnlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PnlRecord — the analysis output, one per holding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlRecord {
    pub mint: String,
    pub balance: Decimal,
    pub purchase_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub value_delta: Option<Decimal>,
    pub percent_delta: Option<Decimal>,
    pub status: PnlStatus,
    /// `value_delta` is for a single unit because the position total
    /// overflows.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub delta_per_unit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_error: Option<PriceUnavailable>,
}

impl PnlRecord {
    pub fn pending(mint: impl Into<String>, balance: Decimal) -> Self {
        Self {
            mint: mint.into(),
            balance,
            purchase_price: None,
            current_price: None,
            value_delta: None,
            percent_delta: None,
            status: PnlStatus::Pending,
            delta_per_unit: false,
            price_error: None,
        }
    }
}

impl fmt::Display for PnlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.mint.chars().take(8).collect();
        write!(f, "{} balance={} status={}", short, self.balance, self.status)?;
        if let Some(delta) = self.value_delta {
            write!(f, " delta={}", delta.round_dp(6))?;
            if self.delta_per_unit {
                f.write_str("/unit")?;
            }
        }
        if let Some(pct) = self.percent_delta {
            write!(f, " ({}%)", pct.round_dp(2))?;
        }
        Ok(())
    }
}
