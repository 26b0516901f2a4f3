use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::PriceUnavailable;
use crate::models::SOL_DECIMALS;

/// Raw amount of the token quoted for every price lookup. Small enough to
/// keep price impact negligible.
pub const QUOTE_AMOUNT: u64 = 1_000_000;

pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

/// Current SOL price of a token, or why it could not be obtained.
pub type PriceQuote = Result<Decimal, PriceUnavailable>;

/// Live market price source. Implementations never fail the caller; every
/// failure comes back as a `PriceUnavailable` value.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn current_price(&self, mint: &str) -> PriceQuote;
}

/// SOL price implied by a quote's raw `outAmount` (lamports).
pub fn price_from_out_amount(out_amount: &str) -> PriceQuote {
    let lamports: u64 = out_amount
        .trim()
        .parse()
        .map_err(|_| PriceUnavailable::Malformed(format!("outAmount {out_amount:?} is not an integer")))?;
    if lamports == 0 {
        return Err(PriceUnavailable::NoRoute);
    }
    Ok(Decimal::from_i128_with_scale(i128::from(lamports), SOL_DECIMALS))
}
