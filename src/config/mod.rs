use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HELIUS_API_URL: &str = "https://api.helius.xyz";
const DEFAULT_HELIUS_RPC_URL: &str = "https://mainnet.helius-rpc.com";
const DEFAULT_JUPITER_QUOTE_URL: &str = "https://quote-api.jup.ag/v6";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub helius_api_key: String,
    pub helius_api_url: String,
    pub helius_rpc_url: String,
    pub jupiter_quote_url: String,

    // Transaction sync
    pub tx_page_size: usize,

    // Price oracle
    pub slippage_bps: u16,
    pub quote_timeout_secs: u64,

    // HTTP
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,

    /// Tokens evaluated at once. 1 keeps evaluation strictly sequential.
    pub eval_concurrency: usize,

    pub wallet_address: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            helius_api_key: env::var("HELIUS_API_KEY")
                .map_err(|_| anyhow::anyhow!("HELIUS_API_KEY must be set"))?,
            helius_api_url: env::var("HELIUS_API_URL")
                .unwrap_or_else(|_| DEFAULT_HELIUS_API_URL.into()),
            helius_rpc_url: env::var("HELIUS_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_HELIUS_RPC_URL.into()),
            jupiter_quote_url: env::var("JUPITER_QUOTE_URL")
                .unwrap_or_else(|_| DEFAULT_JUPITER_QUOTE_URL.into()),

            tx_page_size: parse_var("TX_PAGE_SIZE", 25)?,

            slippage_bps: parse_var("SLIPPAGE_BPS", 50)?,
            quote_timeout_secs: parse_var("QUOTE_TIMEOUT_SECS", 5)?,

            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 10)?,
            http_max_retries: parse_var("HTTP_MAX_RETRIES", 2)?,

            eval_concurrency: parse_var::<usize>("EVAL_CONCURRENCY", 1)?.max(1),

            wallet_address: env::var("WALLET_ADDRESS")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn quote_timeout(&self) -> Duration {
        Duration::from_secs(self.quote_timeout_secs)
    }
}

/// Log line format for the binary's fmt layer (`LOG_FORMAT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Read before the rest of the config so that tracing is up first.
pub fn log_format() -> anyhow::Result<LogFormat> {
    parse_var("LOG_FORMAT", LogFormat::Text)
}

/// Read an optional variable; unset means `default`, set-but-invalid
/// is an error.
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {name}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
