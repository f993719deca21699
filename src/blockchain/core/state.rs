use crate::transaction::{Amount, Transaction};

use super::chain::Block;

/// Replays every transaction in `blocks`. A self-transfer nets to zero.
/// The running total saturates at the `Amount` bounds instead of overflowing.
pub fn balance_of(blocks: &[Block], address: &str) -> Amount {
    let mut balance: Amount = 0;
    for tx in blocks.iter().flat_map(|b| b.transactions.iter()) {
        if tx.sender() == Some(address) {
            balance = balance.saturating_sub(tx.amount());
        }
        if tx.recipient() == address {
            balance = balance.saturating_add(tx.amount());
        }
    }
    balance
}

/// All transactions sent or received by `address`, in chain order.
pub fn transactions_for_wallet<'a>(blocks: &'a [Block], address: &str) -> Vec<&'a Transaction> {
    blocks
        .iter()
        .flat_map(|b| b.transactions.iter())
        .filter(|tx| tx.involves(address))
        .collect()
}
