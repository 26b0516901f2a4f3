use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{Holding, Transaction};

/// Everything an analysis run needs about one wallet, fetched once and then
/// shared immutably across all per-token evaluations.
#[derive(Debug, Clone)]
pub struct WalletSnapshot {
    pub holdings: Vec<Holding>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    /// Signature of the newest known transaction; the stop marker for the
    /// next incremental sync.
    pub last_signature: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl WalletSnapshot {
    pub fn new(holdings: Vec<Holding>, transactions: Vec<Transaction>) -> Self {
        let last_signature = transactions.first().map(|tx| tx.signature.clone());
        Self {
            holdings,
            transactions,
            last_signature,
            fetched_at: Utc::now(),
        }
    }

    /// Build the successor snapshot after an incremental sync: `new_txs`
    /// (newest first) go in front of the known log, signatures already
    /// present are dropped.
    pub fn merged(&self, holdings: Vec<Holding>, new_txs: Vec<Transaction>) -> Self {
        let mut seen: HashSet<&str> = HashSet::with_capacity(new_txs.len() + self.transactions.len());
        let mut transactions = Vec::with_capacity(new_txs.len() + self.transactions.len());

        for tx in new_txs.iter().chain(self.transactions.iter()) {
            if seen.insert(tx.signature.as_str()) {
                transactions.push(tx.clone());
            }
        }

        let last_signature = transactions
            .first()
            .map(|tx| tx.signature.clone())
            .or_else(|| self.last_signature.clone());

        Self {
            holdings,
            transactions,
            last_signature,
            fetched_at: Utc::now(),
        }
    }
}

/// Caller-owned cache of wallet snapshots. Invalidation is explicit.
#[derive(Debug, Default)]
pub struct WalletCache {
    entries: HashMap<String, Arc<WalletSnapshot>>,
}

impl WalletCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, wallet: &str) -> Option<Arc<WalletSnapshot>> {
        self.entries.get(wallet).cloned()
    }

    pub fn insert(&mut self, wallet: &str, snapshot: WalletSnapshot) -> Arc<WalletSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.entries.insert(wallet.to_string(), Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the cached snapshot for one wallet. Returns whether one existed.
    pub fn invalidate(&mut self, wallet: &str) -> bool {
        self.entries.remove(wallet).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
