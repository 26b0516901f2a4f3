use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::models::PnlStatus;

/// Install the Prometheus recorder and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!("sync_pages_total", "Transaction history pages fetched");
    describe_counter!("price_lookup_failures_total", "Quote requests that produced no price");
    describe_counter!("pnl_records_total", "Terminal P&L records by status");

    // Pre-register counters so they appear even before the first increment.
    counter!("sync_pages_total").absolute(0);
    counter!("price_lookup_failures_total").absolute(0);
    for status in [
        PnlStatus::NoCostBasisFound,
        PnlStatus::NoCurrentPriceFound,
        PnlStatus::Profit,
        PnlStatus::Loss,
    ] {
        counter!("pnl_records_total", "status" => status.as_str()).absolute(0);
    }

    Ok(handle)
}
