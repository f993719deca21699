//! Proof-of-work search

use crate::blockchain::Block;
use crate::error::ChainError;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Hex characters in a SHA-256 digest; no difficulty above this can be met.
pub const MAX_DIFFICULTY: u32 = 64;

/// True when the first `difficulty` hex characters of `hash` are all `'0'`.
pub fn hash_meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}

/// Increments the nonce until the block hash satisfies `difficulty`.
pub fn mine(block: &mut Block, difficulty: u32) {
    while !hash_meets_difficulty(&block.hash, difficulty) {
        block.nonce += 1;
        block.hash = block.calculate_hash();
    }

    info!("Block mined: {} (nonce {})", block.hash, block.nonce);
}

/// Like [`mine`], but checks `cancel` before every nonce increment.
/// On cancellation the block keeps the last nonce tried and its matching hash.
pub fn mine_cancellable(
    block: &mut Block,
    difficulty: u32,
    cancel: &AtomicBool,
) -> Result<(), ChainError> {
    while !hash_meets_difficulty(&block.hash, difficulty) {
        if cancel.load(Ordering::Relaxed) {
            info!("Mining cancelled at nonce {}", block.nonce);
            return Err(ChainError::MiningCancelled);
        }
        block.nonce += 1;
        block.hash = block.calculate_hash();
    }

    info!("Block mined: {} (nonce {})", block.hash, block.nonce);
    Ok(())
}

/// Consumes and returns a mined block.
pub fn mine_block(mut block: Block, difficulty: u32) -> Block {
    mine(&mut block, difficulty);
    block
}
