use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, Url};

use super::types::{QuoteError, QuoteResponse};
use crate::analysis::price_oracle::{
    price_from_out_amount, PriceOracle, PriceQuote, DEFAULT_SLIPPAGE_BPS, QUOTE_AMOUNT,
};
use crate::errors::PriceUnavailable;
use crate::models::WSOL_MINT;

const JUPITER_QUOTE_BASE: &str = "https://quote-api.jup.ag/v6";
const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Jupiter swap-quote client used as the price oracle: quotes a fixed
/// amount of a token into SOL.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_url: String,
    slippage_bps: u16,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: JUPITER_QUOTE_BASE.into(),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            timeout: DEFAULT_QUOTE_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u16) -> Self {
        self.slippage_bps = slippage_bps;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request a swap quote. Single attempt; callers treat failure as
    /// "price unavailable".
    pub async fn get_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
    ) -> Result<QuoteResponse, PriceUnavailable> {
        let amount = amount.to_string();
        let slippage_bps = self.slippage_bps.to_string();
        let url = Url::parse_with_params(
            &format!("{}/quote", self.base_url),
            &[
                ("inputMint", input_mint),
                ("outputMint", output_mint),
                ("amount", amount.as_str()),
                ("slippageBps", slippage_bps.as_str()),
            ],
        )
        .map_err(|e| PriceUnavailable::Http(format!("invalid quote URL: {e}")))?;

        let resp = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        parse_quote_body(status, &body)
    }
}

/// Classify a quote response body.
pub(crate) fn parse_quote_body(status: u16, body: &[u8]) -> Result<QuoteResponse, PriceUnavailable> {
    if let Ok(err) = serde_json::from_slice::<QuoteError>(body) {
        if let Some(message) = err.error.clone().or(err.error_code.clone()) {
            if is_no_route(&err) {
                return Err(PriceUnavailable::NoRoute);
            }
            return Err(if (200..300).contains(&status) {
                PriceUnavailable::Malformed(message)
            } else {
                PriceUnavailable::Http(format!("{status}: {message}"))
            });
        }
    }

    if !(200..300).contains(&status) {
        return Err(PriceUnavailable::Http(format!("status {status}")));
    }

    serde_json::from_slice(body).map_err(|e| PriceUnavailable::Malformed(e.to_string()))
}

fn is_no_route(err: &QuoteError) -> bool {
    let code = err.error_code.as_deref().unwrap_or_default();
    let text = err.error.as_deref().unwrap_or_default().to_ascii_lowercase();
    code.contains("ROUTE") || code.contains("NOT_TRADABLE") || text.contains("route")
}

#[async_trait]
impl PriceOracle for QuoteClient {
    async fn current_price(&self, mint: &str) -> PriceQuote {
        let result = self
            .get_quote(mint, WSOL_MINT, QUOTE_AMOUNT)
            .await
            .and_then(|quote| match quote.out_amount {
                Some(out) => price_from_out_amount(&out),
                None => Err(PriceUnavailable::Malformed("missing outAmount".into())),
            });

        if let Err(ref e) = result {
            counter!("price_lookup_failures_total").increment(1);
            tracing::debug!(mint = %mint, error = %e, "Price lookup failed");
        }
        result
    }
}
