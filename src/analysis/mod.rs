pub mod analyzer;
pub mod cost_basis;
pub mod pnl;
pub mod price_oracle;

pub use analyzer::{evaluate_holdings, AnalyzerConfig, WalletAnalyzer};
pub use cost_basis::resolve_cost_basis;
pub use pnl::{compute_pnl, evaluate_token, PnlFigures};
pub use price_oracle::{PriceOracle, PriceQuote, QUOTE_AMOUNT};
