pub mod holding;
pub mod pnl;
pub mod transaction;

pub use holding::Holding;
pub use pnl::{CostBasis, PnlRecord, PnlStatus};
pub use transaction::{Transaction, Transfer};

/// Mint of wrapped SOL, the native asset as it appears in token transfers.
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// SOL has 9 decimals (lamports).
pub const SOL_DECIMALS: u32 = 9;
