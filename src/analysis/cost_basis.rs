use rust_decimal::Decimal;

use crate::models::{CostBasis, Transaction, WSOL_MINT};

/// Find the implied purchase price of `mint` for `wallet`.
///
/// Transactions are scanned in the order given (newest first as synced).
/// The first one in which the wallet both sent SOL and received `mint`
/// decides the price: `sol_out / token_in` summed over that transaction's
/// transfers. Later transactions are not consulted, so multiple buys are
/// not averaged.
pub fn resolve_cost_basis(mint: &str, transactions: &[Transaction], wallet: &str) -> Option<CostBasis> {
    transactions.iter().find_map(|tx| {
        let (sol_out, token_in) = purchase_legs(mint, tx, wallet);
        if sol_out <= Decimal::ZERO || token_in <= Decimal::ZERO {
            return None;
        }
        let price_per_unit = sol_out.checked_div(token_in)?;
        Some(CostBasis {
            mint: mint.to_string(),
            price_per_unit,
            signature: tx.signature.clone(),
            sol_spent: sol_out,
            tokens_received: token_in,
        })
    })
}

/// SOL sent by the wallet and `mint` received by the wallet within one
/// transaction.
fn purchase_legs(mint: &str, tx: &Transaction, wallet: &str) -> (Decimal, Decimal) {
    let mut sol_out = Decimal::ZERO;
    let mut token_in = Decimal::ZERO;

    for transfer in &tx.token_transfers {
        if transfer.mint == WSOL_MINT && transfer.is_from(wallet) {
            sol_out = sol_out.saturating_add(transfer.token_amount);
        }
        if transfer.mint == mint && transfer.is_to(wallet) {
            token_in = token_in.saturating_add(transfer.token_amount);
        }
    }

    (sol_out, token_in)
}
