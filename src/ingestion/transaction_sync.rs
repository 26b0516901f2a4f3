use async_trait::async_trait;
use metrics::counter;

use crate::errors::RetrievalError;
use crate::models::Transaction;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// A paginated, newest-first view of a wallet's transaction history.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch up to `limit` transactions strictly older than `before`
    /// (or the newest ones when `before` is `None`), newest first.
    async fn fetch_page(
        &self,
        wallet: &str,
        before: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Transaction>, RetrievalError>;
}

/// Fetch every transaction newer than `known_last_signature`, newest first.
///
/// Pagination walks backward with the last signature of each page as the
/// `before` cursor and stops at:
/// 1. the known signature (it and everything older are dropped),
/// 2. an empty page,
/// 3. a page shorter than `page_size` (end of history, no extra request).
///
/// Any page failure aborts the whole sync; nothing partial is returned.
pub async fn fetch_new_transactions<S>(
    source: &S,
    wallet: &str,
    known_last_signature: Option<&str>,
    page_size: usize,
) -> Result<Vec<Transaction>, RetrievalError>
where
    S: TransactionSource + ?Sized,
{
    let page_size = page_size.max(1);
    let mut all_txs: Vec<Transaction> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = source
            .fetch_page(wallet, cursor.as_deref(), page_size)
            .await?;
        pages += 1;
        counter!("sync_pages_total").increment(1);

        tracing::debug!(
            wallet = %wallet,
            page = pages,
            count = page.len(),
            before = cursor.as_deref().unwrap_or("-"),
            "Fetched transaction page"
        );

        let Some(last) = page.last() else {
            break;
        };
        let next_cursor = last.signature.clone();
        let page_len = page.len();

        let mut reached_known = false;
        for tx in page {
            if known_last_signature == Some(tx.signature.as_str()) {
                reached_known = true;
                break;
            }
            all_txs.push(tx);
        }

        if reached_known || page_len < page_size {
            break;
        }
        cursor = Some(next_cursor);
    }

    tracing::info!(
        wallet = %wallet,
        pages,
        new_transactions = all_txs.len(),
        "Transaction sync complete"
    );

    Ok(all_txs)
}
