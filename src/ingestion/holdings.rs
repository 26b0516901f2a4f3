use std::collections::HashSet;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::RetrievalError;
use crate::models::{Holding, WSOL_MINT};

/// Largest scale a `Decimal` can represent.
const MAX_DECIMALS: u32 = 28;

/// Source of the raw fungible-asset entries owned by a wallet.
///
/// Entries are returned unparsed so that one malformed asset cannot fail
/// the whole snapshot.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_assets(&self, wallet: &str) -> Result<Vec<Value>, RetrievalError>;
}

/// Fetch the wallet's current token holdings.
pub async fn fetch_holdings<S>(source: &S, wallet: &str) -> Result<Vec<Holding>, RetrievalError>
where
    S: AssetSource + ?Sized,
{
    let items = source.fetch_assets(wallet).await?;
    let total = items.len();
    let holdings = normalize_assets(&items);

    tracing::info!(
        wallet = %wallet,
        assets = total,
        holdings = holdings.len(),
        "Holdings snapshot fetched"
    );

    Ok(holdings)
}

/// Turn raw asset entries into holdings, dropping wrapped SOL, zero
/// balances, malformed entries and repeated mints.
pub fn normalize_assets(items: &[Value]) -> Vec<Holding> {
    let mut seen = HashSet::new();
    let mut holdings = Vec::new();

    for item in items {
        let Some(holding) = parse_asset(item) else {
            continue;
        };
        if holding.mint == WSOL_MINT || holding.raw_balance == 0 {
            continue;
        }
        if !seen.insert(holding.mint.clone()) {
            tracing::debug!(mint = %holding.mint, "Duplicate asset entry ignored");
            continue;
        }
        holdings.push(holding);
    }

    holdings
}

/// Parse one asset entry. Missing balance/decimals default to zero; anything
/// present but unusable skips the entry.
fn parse_asset(item: &Value) -> Option<Holding> {
    let Some(mint) = item.get("id").and_then(Value::as_str) else {
        tracing::debug!("Asset entry without id skipped");
        return None;
    };
    let token_info = item.get("token_info");

    let raw_balance = match token_info.and_then(|t| t.get("balance")) {
        None | Some(Value::Null) => 0,
        Some(v) => match parse_u64(v) {
            Some(b) => b,
            None => {
                tracing::debug!(mint = %mint, balance = %v, "Unparseable balance, asset skipped");
                return None;
            }
        },
    };

    let decimals = match token_info.and_then(|t| t.get("decimals")) {
        None | Some(Value::Null) => 0,
        Some(v) => match parse_u64(v).and_then(|d| u32::try_from(d).ok()) {
            Some(d) if d <= MAX_DECIMALS => d,
            _ => {
                tracing::debug!(mint = %mint, decimals = %v, "Unusable decimals, asset skipped");
                return None;
            }
        },
    };

    Some(Holding {
        mint: mint.to_string(),
        balance: Decimal::from_i128_with_scale(i128::from(raw_balance), decimals),
        raw_balance,
        decimals,
    })
}

fn parse_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
