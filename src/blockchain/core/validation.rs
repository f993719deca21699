use crate::error::ChainError;

use super::chain::Block;

/// Checks the genesis block against `expected_genesis`, then every later block
/// for valid transactions, an up-to-date hash and a link to its predecessor.
/// Stops at the first violation.
pub fn validate_chain(blocks: &[Block], expected_genesis: &Block) -> Result<(), ChainError> {
    match blocks.first() {
        Some(genesis) if genesis == expected_genesis => {}
        _ => return Err(ChainError::InvalidGenesis),
    }

    for (index, pair) in blocks.windows(2).enumerate() {
        let (previous, block) = (&pair[0], &pair[1]);
        let index = index + 1;

        if !block.has_valid_transactions() {
            return Err(ChainError::InvalidBlock {
                index,
                reason: "contains an invalid transaction".to_string(),
            });
        }

        let recomputed = block.calculate_hash();
        if block.hash != recomputed {
            return Err(ChainError::InvalidBlock {
                index,
                reason: format!("stored hash {} but contents hash to {}", block.hash, recomputed),
            });
        }

        if block.previous_hash != previous.hash {
            return Err(ChainError::InvalidBlockLinkage(index));
        }
    }

    Ok(())
}
