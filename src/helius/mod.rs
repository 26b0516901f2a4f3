pub mod assets_client;
pub mod http;
pub mod transactions_client;
pub mod types;

pub use assets_client::AssetsClient;
pub use http::RetryPolicy;
pub use transactions_client::TransactionsClient;
pub use types::{RpcError, RpcResponse};
