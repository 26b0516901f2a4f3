use std::sync::Arc;

use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use super::pnl::evaluate_token;
use super::price_oracle::PriceOracle;
use crate::errors::RetrievalError;
use crate::ingestion::{
    fetch_holdings, fetch_new_transactions, AssetSource, TransactionSource, WalletCache,
    WalletSnapshot, DEFAULT_PAGE_SIZE,
};
use crate::models::PnlRecord;

/// Lazily evaluate every holding in `snapshot`, yielding one terminal record
/// per holding in holdings order.
///
/// With `concurrency > 1` up to that many tokens are evaluated at once;
/// output order is unchanged. Dropping the stream stops the run.
pub fn evaluate_holdings<'a, P>(
    wallet: &'a str,
    snapshot: Arc<WalletSnapshot>,
    oracle: &'a P,
    concurrency: usize,
) -> impl Stream<Item = PnlRecord> + Send + 'a
where
    P: PriceOracle + ?Sized,
{
    let holdings = snapshot.holdings.clone();
    stream::iter(holdings)
        .map(move |holding| {
            let snapshot = Arc::clone(&snapshot);
            async move { evaluate_token(wallet, &holding, &snapshot.transactions, oracle).await }
        })
        .buffered(concurrency.max(1))
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub page_size: usize,
    pub eval_concurrency: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            eval_concurrency: 1,
        }
    }
}

/// Ties the sources, the price oracle and the wallet cache together behind
/// `analyze_wallet`.
pub struct WalletAnalyzer<T, A, P> {
    transactions: T,
    assets: A,
    oracle: P,
    cache: WalletCache,
    config: AnalyzerConfig,
}

impl<T, A, P> WalletAnalyzer<T, A, P>
where
    T: TransactionSource,
    A: AssetSource,
    P: PriceOracle,
{
    pub fn new(transactions: T, assets: A, oracle: P) -> Self {
        Self::with_config(transactions, assets, oracle, AnalyzerConfig::default())
    }

    pub fn with_config(transactions: T, assets: A, oracle: P, config: AnalyzerConfig) -> Self {
        Self {
            transactions,
            assets,
            oracle,
            cache: WalletCache::new(),
            config,
        }
    }

    pub fn cache(&self) -> &WalletCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut WalletCache {
        &mut self.cache
    }

    /// Analyze every token held by `wallet`.
    ///
    /// Holdings and transactions come from the cache when present and are
    /// fetched (full history) otherwise. A retrieval failure aborts before
    /// any record is produced.
    pub async fn analyze_wallet<'a>(
        &'a mut self,
        wallet: &'a str,
    ) -> Result<BoxStream<'a, PnlRecord>, RetrievalError> {
        let snapshot = self.load(wallet).await?;
        Ok(self.records(wallet, snapshot))
    }

    /// Cached snapshot for `wallet`, fetching it on a miss.
    pub async fn load(&mut self, wallet: &str) -> Result<Arc<WalletSnapshot>, RetrievalError> {
        if let Some(snapshot) = self.cache.get(wallet) {
            tracing::debug!(wallet = %wallet, "Using cached wallet snapshot");
            return Ok(snapshot);
        }

        let snapshot = self.fetch_snapshot(wallet).await?;
        Ok(self.cache.insert(wallet, snapshot))
    }

    /// Bring the cached snapshot up to date: only transactions newer than the
    /// cached `last_signature` are fetched, holdings are re-read. Falls back
    /// to a full load when nothing is cached.
    pub async fn refresh(&mut self, wallet: &str) -> Result<Arc<WalletSnapshot>, RetrievalError> {
        let Some(previous) = self.cache.get(wallet) else {
            return self.load(wallet).await;
        };

        let holdings = fetch_holdings(&self.assets, wallet).await?;
        let new_txs = fetch_new_transactions(
            &self.transactions,
            wallet,
            previous.last_signature.as_deref(),
            self.config.page_size,
        )
        .await?;

        tracing::info!(
            wallet = %wallet,
            new_transactions = new_txs.len(),
            known_transactions = previous.transactions.len(),
            "Wallet snapshot refreshed"
        );

        let snapshot = previous.merged(holdings, new_txs);
        Ok(self.cache.insert(wallet, snapshot))
    }

    /// Drop whatever is cached for `wallet` and fetch everything again.
    pub async fn rescan(&mut self, wallet: &str) -> Result<Arc<WalletSnapshot>, RetrievalError> {
        self.cache.invalidate(wallet);
        self.load(wallet).await
    }

    /// Record stream over an already loaded snapshot.
    pub fn records<'a>(
        &'a self,
        wallet: &'a str,
        snapshot: Arc<WalletSnapshot>,
    ) -> BoxStream<'a, PnlRecord> {
        tracing::info!(
            wallet = %wallet,
            holdings = snapshot.holdings.len(),
            transactions = snapshot.transactions.len(),
            "Analyzing wallet"
        );
        evaluate_holdings(wallet, snapshot, &self.oracle, self.config.eval_concurrency).boxed()
    }

    async fn fetch_snapshot(&self, wallet: &str) -> Result<WalletSnapshot, RetrievalError> {
        let holdings = fetch_holdings(&self.assets, wallet).await?;
        let transactions =
            fetch_new_transactions(&self.transactions, wallet, None, self.config.page_size).await?;
        Ok(WalletSnapshot::new(holdings, transactions))
    }
}
