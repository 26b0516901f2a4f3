use std::collections::HashMap;

use futures_util::StreamExt;

use solpnl::analysis::{AnalyzerConfig, WalletAnalyzer};
use solpnl::config::{self, AppConfig, LogFormat};
use solpnl::helius::{AssetsClient, RetryPolicy, TransactionsClient};
use solpnl::jupiter::QuoteClient;
use solpnl::models::PnlStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(config::log_format()?);

    let config = AppConfig::from_env()?;
    let metrics_handle = solpnl::metrics::init_metrics()?;

    let wallet = std::env::args()
        .nth(1)
        .or_else(|| config.wallet_address.clone())
        .ok_or_else(|| anyhow::anyhow!("usage: solpnl <WALLET_ADDRESS> (or set WALLET_ADDRESS)"))?;

    let http = reqwest::Client::new();
    let retry = RetryPolicy::new(config.http_max_retries);

    let transactions = TransactionsClient::new(http.clone(), config.helius_api_key.clone())
        .with_base_url(config.helius_api_url.clone())
        .with_timeout(config.http_timeout())
        .with_retry(retry);
    let assets = AssetsClient::new(http.clone(), config.helius_api_key.clone())
        .with_rpc_url(config.helius_rpc_url.clone())
        .with_timeout(config.http_timeout())
        .with_retry(retry);
    let quotes = QuoteClient::new(http)
        .with_base_url(config.jupiter_quote_url.clone())
        .with_slippage_bps(config.slippage_bps)
        .with_timeout(config.quote_timeout());

    let mut analyzer = WalletAnalyzer::with_config(
        transactions,
        assets,
        quotes,
        AnalyzerConfig {
            page_size: config.tx_page_size,
            eval_concurrency: config.eval_concurrency,
        },
    );

    tracing::info!(wallet = %wallet, "Loading wallet data...");
    let mut records = analyzer.analyze_wallet(&wallet).await?;

    let mut tally: HashMap<PnlStatus, usize> = HashMap::new();
    let mut index = 0usize;
    while let Some(record) = records.next().await {
        index += 1;
        *tally.entry(record.status).or_default() += 1;
        tracing::info!(
            n = index,
            mint = %record.mint,
            balance = %record.balance,
            purchase_price = ?record.purchase_price,
            current_price = ?record.current_price,
            value_delta = ?record.value_delta.map(|d| d.round_dp(6)),
            percent_delta = ?record.percent_delta.map(|p| p.round_dp(2)),
            status = %record.status,
            "{record}"
        );
    }

    tracing::info!(
        tokens = index,
        profit = tally.get(&PnlStatus::Profit).copied().unwrap_or(0),
        loss = tally.get(&PnlStatus::Loss).copied().unwrap_or(0),
        no_cost_basis = tally.get(&PnlStatus::NoCostBasisFound).copied().unwrap_or(0),
        no_price = tally.get(&PnlStatus::NoCurrentPriceFound).copied().unwrap_or(0),
        "Analysis complete"
    );
    tracing::debug!(metrics = %metrics_handle.render(), "Run metrics");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}
