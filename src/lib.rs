pub mod analysis;
pub mod config;
pub mod errors;
pub mod helius;
pub mod ingestion;
pub mod jupiter;
pub mod metrics;
pub mod models;

pub use analysis::{AnalyzerConfig, WalletAnalyzer};
pub use errors::{PriceUnavailable, RetrievalError};
pub use models::{Holding, PnlRecord, PnlStatus, Transaction, Transfer};
