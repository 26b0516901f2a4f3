pub mod http_server;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use solpnl::analysis::{PriceOracle, PriceQuote};
use solpnl::errors::{PriceUnavailable, RetrievalError};
use solpnl::ingestion::{AssetSource, TransactionSource};
use solpnl::models::{Transaction, Transfer, WSOL_MINT};

pub const WALLET: &str = "WaLLet1111111111111111111111111111111111111";
pub const POOL: &str = "PooL2222222222222222222222222222222222222222";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

#[allow(dead_code)]
pub fn transfer(mint: &str, amount: Decimal, from: &str, to: &str) -> Transfer {
    Transfer {
        mint: mint.into(),
        token_amount: amount,
        from_user_account: Some(from.into()),
        to_user_account: Some(to.into()),
    }
}

#[allow(dead_code)]
pub fn plain_tx(sig: &str) -> Transaction {
    Transaction {
        signature: sig.into(),
        token_transfers: Vec::new(),
        timestamp: None,
        tx_type: None,
        source: None,
    }
}

/// Wallet swaps `sol` SOL for `tokens` of `mint`.
#[allow(dead_code)]
pub fn buy_tx(sig: &str, mint: &str, sol: Decimal, tokens: Decimal) -> Transaction {
    Transaction {
        token_transfers: vec![
            transfer(WSOL_MINT, sol, WALLET, POOL),
            transfer(mint, tokens, POOL, WALLET),
        ],
        tx_type: Some("SWAP".into()),
        ..plain_tx(sig)
    }
}

/// `n` signature-only transactions, newest first: `tx-{n-1}` .. `tx-0`.
#[allow(dead_code)]
pub fn history(n: usize) -> Vec<Transaction> {
    (0..n).rev().map(|i| plain_tx(&format!("tx-{i}"))).collect()
}

#[allow(dead_code)]
pub fn asset(mint: &str, raw_balance: u64, decimals: u32) -> Value {
    json!({
        "id": mint,
        "interface": "FungibleToken",
        "token_info": { "balance": raw_balance, "decimals": decimals }
    })
}

// ---------------------------------------------------------------------------
// Fake transaction source
// ---------------------------------------------------------------------------

/// In-memory newest-first history that records every page request's
/// `before` cursor.
#[derive(Clone, Default)]
pub struct FakeHistory {
    txs: Arc<Mutex<Vec<Transaction>>>,
    pub requests: Arc<Mutex<Vec<Option<String>>>>,
    /// Zero-based page index that fails.
    fail_on_page: Option<usize>,
}

#[allow(dead_code)]
impl FakeHistory {
    pub fn new(txs: Vec<Transaction>) -> Self {
        Self {
            txs: Arc::new(Mutex::new(txs)),
            ..Self::default()
        }
    }

    pub fn failing_on_page(mut self, page: usize) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    /// New activity lands at the front (newest first).
    pub fn push_newest(&self, tx: Transaction) {
        self.txs.lock().unwrap().insert(0, tx);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TransactionSource for FakeHistory {
    async fn fetch_page(
        &self,
        _wallet: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>, RetrievalError> {
        let page_index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(before.map(str::to_string));
            requests.len() - 1
        };
        if self.fail_on_page == Some(page_index) {
            return Err(RetrievalError::Status {
                status: 500,
                body: "boom".into(),
            });
        }

        let txs = self.txs.lock().unwrap();
        let start = match before {
            Some(sig) => txs
                .iter()
                .position(|t| t.signature == sig)
                .map(|i| i + 1)
                .unwrap_or(txs.len()),
            None => 0,
        };
        Ok(txs.iter().skip(start).take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Fake asset source
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct FakeAssets {
    items: Arc<Mutex<Vec<Value>>>,
    fail: bool,
}

#[allow(dead_code)]
impl FakeAssets {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn set(&self, items: Vec<Value>) {
        *self.items.lock().unwrap() = items;
    }
}

#[async_trait]
impl AssetSource for FakeAssets {
    async fn fetch_assets(&self, _wallet: &str) -> Result<Vec<Value>, RetrievalError> {
        if self.fail {
            return Err(RetrievalError::Rpc {
                code: -32000,
                message: "unavailable".into(),
            });
        }
        Ok(self.items.lock().unwrap().clone())
    }
}

// ---------------------------------------------------------------------------
// Fake price oracle
// ---------------------------------------------------------------------------

/// Fixed quotes per mint; unknown mints have no route.
#[derive(Clone, Default)]
pub struct FakeOracle {
    quotes: HashMap<String, PriceQuote>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, mint: &str, price: Decimal) -> Self {
        self.quotes.insert(mint.into(), Ok(price));
        self
    }

    pub fn with_failure(mut self, mint: &str, reason: PriceUnavailable) -> Self {
        self.quotes.insert(mint.into(), Err(reason));
        self
    }
}

#[async_trait]
impl PriceOracle for FakeOracle {
    async fn current_price(&self, mint: &str) -> PriceQuote {
        self.calls.lock().unwrap().push(mint.to_string());
        self.quotes
            .get(mint)
            .cloned()
            .unwrap_or(Err(PriceUnavailable::NoRoute))
    }
}
