pub mod cache;
pub mod holdings;
pub mod transaction_sync;

pub use cache::{WalletCache, WalletSnapshot};
pub use holdings::{fetch_holdings, normalize_assets, AssetSource};
pub use transaction_sync::{fetch_new_transactions, TransactionSource, DEFAULT_PAGE_SIZE};
