use metrics::counter;
use rust_decimal::Decimal;
use serde::Serialize;

use super::cost_basis::resolve_cost_basis;
use super::price_oracle::PriceOracle;
use crate::models::{Holding, PnlRecord, PnlStatus, Transaction};

/// Position value figures for one token, all in SOL except `percent_delta`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlFigures {
    pub total_buy: Decimal,
    pub total_now: Decimal,
    pub value_delta: Decimal,
    /// `None` only when nothing was paid (`total_buy == 0`).
    pub percent_delta: Option<Decimal>,
    pub status: PnlStatus,
    /// Position totals did not fit in a `Decimal`; the figures are for a
    /// single unit instead.
    pub per_unit: bool,
}

/// Unrealized P&L of `balance` units bought at `purchase_price` and now
/// worth `current_price` each.
///
/// A zero delta is a `Loss`: only a strictly positive delta counts as profit.
/// Never panics: totals that overflow fall back to per-unit figures, a
/// percentage that overflows saturates.
pub fn compute_pnl(balance: Decimal, purchase_price: Decimal, current_price: Decimal) -> PnlFigures {
    let totals = purchase_price
        .checked_mul(balance)
        .zip(current_price.checked_mul(balance))
        .and_then(|(buy, now)| now.checked_sub(buy).map(|delta| (buy, now, delta)));

    let (total_buy, total_now, value_delta, per_unit) = match totals {
        Some((buy, now, delta)) => (buy, now, delta, false),
        None => (
            purchase_price,
            current_price,
            current_price.saturating_sub(purchase_price),
            true,
        ),
    };

    let status = if value_delta > Decimal::ZERO {
        PnlStatus::Profit
    } else {
        PnlStatus::Loss
    };

    PnlFigures {
        total_buy,
        total_now,
        value_delta,
        percent_delta: percent_change(value_delta, total_buy),
        status,
        per_unit,
    }
}

/// `delta / base * 100`, saturating at `Decimal::MAX`/`MIN`.
fn percent_change(delta: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    let saturated = if delta.is_sign_negative() != base.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    let pct = delta
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(saturated);
    Some(pct)
}

/// Run one holding through the P&L state machine:
///
/// ```text
/// Pending ─┬─ no cost basis ───────────► NoCostBasisFound
///          ├─ no current price ────────► NoCurrentPriceFound
///          └─ both known ─ delta > 0 ──► Profit
///                        └ delta <= 0 ─► Loss
/// ```
///
/// Never fails: every outcome is a terminal record.
pub async fn evaluate_token<P>(
    wallet: &str,
    holding: &Holding,
    transactions: &[Transaction],
    oracle: &P,
) -> PnlRecord
where
    P: PriceOracle + ?Sized,
{
    let mut record = PnlRecord::pending(holding.mint.clone(), holding.balance);

    let Some(basis) = resolve_cost_basis(&holding.mint, transactions, wallet) else {
        tracing::debug!(mint = %holding.mint, "No purchase transaction found");
        return finish(record, PnlStatus::NoCostBasisFound);
    };
    record.purchase_price = Some(basis.price_per_unit);

    let current_price = match oracle.current_price(&holding.mint).await {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!(mint = %holding.mint, error = %e, "Current price unavailable");
            record.price_error = Some(e);
            return finish(record, PnlStatus::NoCurrentPriceFound);
        }
    };
    record.current_price = Some(current_price);

    let figures = compute_pnl(holding.balance, basis.price_per_unit, current_price);
    record.value_delta = Some(figures.value_delta);
    record.percent_delta = figures.percent_delta;
    record.delta_per_unit = figures.per_unit;

    if figures.per_unit {
        tracing::warn!(
            mint = %holding.mint,
            balance = %holding.balance,
            "Position value overflows, reporting per-unit delta"
        );
    }

    tracing::debug!(
        mint = %holding.mint,
        purchase_price = %basis.price_per_unit,
        current_price = %current_price,
        value_delta = %figures.value_delta,
        "Token evaluated"
    );

    finish(record, figures.status)
}

fn finish(mut record: PnlRecord, status: PnlStatus) -> PnlRecord {
    debug_assert!(status.is_terminal());
    record.status = status;
    counter!("pnl_records_total", "status" => status.as_str()).increment(1);
    record
}
