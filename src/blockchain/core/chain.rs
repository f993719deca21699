use crate::config::LedgerConfig;
use crate::crypto::Address;
use crate::error::ChainError;
use crate::miner;
use crate::transaction::{Amount, RewardTx, Transaction};
use sha2::{Digest, Sha256};
use std::sync::atomic::AtomicBool;
use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use super::state::{balance_of, transactions_for_wallet};
use super::validation::validate_chain;

/// Genesis timestamp: 2017-01-01T00:00:00Z in milliseconds.
pub const GENESIS_TIMESTAMP: i64 = 1_483_228_800_000;
pub const GENESIS_PREVIOUS_HASH: &str = "0";
pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const DEFAULT_MINING_REWARD: Amount = 100;

static GENESIS_BLOCK: Lazy<Block> = Lazy::new(Blockchain::create_genesis_block);

/// Hex SHA-256 over the block fields. Each transaction contributes its digest
/// and its signature, so any tamper inside a transaction changes the result.
pub fn calculate_block_hash(
    previous_hash: &str,
    timestamp: i64,
    transactions: &[Transaction],
    nonce: u64,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update((previous_hash.len() as u64).to_le_bytes());
    hasher.update(previous_hash.as_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update((transactions.len() as u64).to_le_bytes());
    for tx in transactions {
        hasher.update(tx.calculate_digest());
        let signature = tx.signature().unwrap_or_default();
        hasher.update((signature.len() as u64).to_le_bytes());
        hasher.update(signature);
    }
    hasher.update(nonce.to_le_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub previous_hash: String,
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub hash: String,
}

impl Block {
    pub fn new(timestamp: i64, transactions: Vec<Transaction>, previous_hash: impl Into<String>) -> Self {
        let previous_hash = previous_hash.into();
        let hash = calculate_block_hash(&previous_hash, timestamp, &transactions, 0);

        Block {
            previous_hash,
            timestamp,
            transactions,
            nonce: 0,
            hash,
        }
    }

    /// Recomputes the hash from the current fields; never reads `self.hash`.
    pub fn calculate_hash(&self) -> String {
        calculate_block_hash(&self.previous_hash, self.timestamp, &self.transactions, self.nonce)
    }

    pub fn mine(&mut self, difficulty: u32) {
        miner::mine(self, difficulty);
    }

    pub fn mine_cancellable(&mut self, difficulty: u32, cancel: &AtomicBool) -> Result<(), ChainError> {
        miner::mine_cancellable(self, difficulty, cancel)
    }

    /// A transaction whose check raises counts as invalid.
    pub fn has_valid_transactions(&self) -> bool {
        self.transactions
            .iter()
            .all(|tx| matches!(tx.is_valid(), Ok(true)))
    }
}

#[derive(Debug, Clone)]
pub struct Blockchain {
    pub blocks: Vec<Block>,
    pub pending_transactions: Vec<Transaction>,
    pub difficulty: u32,
    pub mining_reward: Amount,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Create a new `Blockchain` with the default difficulty and reward.
    pub fn new() -> Self {
        Self::with_config(&LedgerConfig::default())
    }

    pub fn with_config(config: &LedgerConfig) -> Self {
        Blockchain {
            blocks: vec![Self::create_genesis_block()],
            pending_transactions: Vec::new(),
            difficulty: config.difficulty,
            mining_reward: config.mining_reward,
        }
    }

    /// The fixed first block. Rebuilding it must reproduce `blocks[0]` exactly.
    pub fn create_genesis_block() -> Block {
        Block::new(GENESIS_TIMESTAMP, Vec::new(), GENESIS_PREVIOUS_HASH)
    }

    pub fn chain(&self) -> &[Block] {
        &self.blocks
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// False unless a caller has cleared `blocks` directly.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The last block. If `blocks` was emptied from outside, the genesis block
    /// stands in so reads and mining keep working; validation then reports
    /// `InvalidGenesis`.
    pub fn get_latest_block(&self) -> &Block {
        self.blocks.last().unwrap_or(&*GENESIS_BLOCK)
    }

    /// Admits a signed transfer into the pending pool.
    ///
    /// The balance check only looks at mined blocks, so several pending
    /// transfers from one sender can together exceed its balance.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<(), ChainError> {
        let sender = match tx.sender() {
            Some(sender) if !sender.is_empty() && !tx.recipient().is_empty() => sender,
            _ => return Err(ChainError::MissingAddress),
        };

        if !tx.is_valid()? {
            return Err(ChainError::InvalidSignature);
        }

        if tx.amount() <= 0 {
            return Err(ChainError::NonPositiveAmount(tx.amount()));
        }

        let balance = self.get_balance_of_address(sender);
        if balance < tx.amount() {
            return Err(ChainError::InsufficientBalance {
                address: sender.to_string(),
                balance,
                requested: tx.amount(),
            });
        }

        debug!(
            "Transaction {} admitted: {} -> {} ({})",
            tx.digest_hex(),
            sender,
            tx.recipient(),
            tx.amount()
        );
        self.pending_transactions.push(tx);
        Ok(())
    }

    /// Seals the pool plus a reward for `reward_address` into a mined block.
    pub fn mine_pending_transactions(&mut self, reward_address: impl Into<Address>) {
        let mut block = self.seal_pending_block(reward_address.into());
        block.mine(self.difficulty);
        self.append_mined_block(block);
    }

    /// Like [`Self::mine_pending_transactions`], but stops when `cancel` is set.
    /// A cancelled run leaves the chain and the pending pool as they were.
    pub fn mine_pending_transactions_cancellable(
        &mut self,
        reward_address: impl Into<Address>,
        cancel: &AtomicBool,
    ) -> Result<(), ChainError> {
        let mut block = self.seal_pending_block(reward_address.into());
        if let Err(e) = block.mine_cancellable(self.difficulty, cancel) {
            // drop the reward, keep the caller's transactions queued
            self.pending_transactions.pop();
            return Err(e);
        }
        self.append_mined_block(block);
        Ok(())
    }

    fn seal_pending_block(&mut self, reward_address: Address) -> Block {
        let reward = RewardTx::new(reward_address, self.mining_reward);
        self.pending_transactions.push(Transaction::Reward(reward));

        Block::new(
            chrono::Utc::now().timestamp_millis(),
            self.pending_transactions.clone(),
            self.get_latest_block().hash.clone(),
        )
    }

    fn append_mined_block(&mut self, block: Block) {
        info!(
            "Block {} appended with {} transactions",
            self.blocks.len(),
            block.transactions.len()
        );
        self.blocks.push(block);
        self.pending_transactions.clear();
    }

    pub fn get_balance_of_address(&self, address: &str) -> Amount {
        balance_of(&self.blocks, address)
    }

    pub fn get_all_transactions_for_wallet(&self, address: &str) -> Vec<&Transaction> {
        transactions_for_wallet(&self.blocks, address)
    }

    /// Returns the first integrity violation found, if any.
    pub fn validate_chain(&self) -> Result<(), ChainError> {
        validate_chain(&self.blocks, &Self::create_genesis_block())
    }

    pub fn is_chain_valid(&self) -> bool {
        match self.validate_chain() {
            Ok(()) => true,
            Err(e) => {
                warn!("Chain validation failed: {}", e);
                false
            }
        }
    }
}
