use serde::Serialize;
use thiserror::Error;

/// Failure to retrieve the transaction log or the holdings snapshot.
///
/// Fatal to an analysis run: without holdings or transactions there is
/// nothing meaningful to compute.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

impl RetrievalError {
    /// Whether retrying the same request has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            RetrievalError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            RetrievalError::Status { status, .. } => *status == 429 || *status >= 500,
            RetrievalError::Decode(_)
            | RetrievalError::Rpc { .. }
            | RetrievalError::InvalidUrl(_) => false,
        }
    }
}

/// Why a current price could not be obtained for a token.
///
/// Never propagated as an error out of the analysis; it downgrades that
/// token's record to `NoCurrentPriceFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum PriceUnavailable {
    #[error("quote request timed out")]
    Timeout,

    #[error("quote request failed: {0}")]
    Http(String),

    #[error("malformed quote response: {0}")]
    Malformed(String),

    #[error("no route to SOL")]
    NoRoute,
}

impl From<reqwest::Error> for PriceUnavailable {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PriceUnavailable::Timeout
        } else if e.is_decode() {
            PriceUnavailable::Malformed(e.to_string())
        } else {
            PriceUnavailable::Http(e.to_string())
        }
    }
}
