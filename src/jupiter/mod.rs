pub mod quote_client;
pub mod types;

pub use quote_client::QuoteClient;
pub use types::QuoteResponse;
