//! Error types for TallyChain

use crate::transaction::Amount;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Cannot sign transactions for other wallets")]
    WrongSigningKey,
    #[error("No signature in this transaction")]
    MissingSignature,
    #[error("Transaction must include sender and recipient addresses")]
    MissingAddress,
    #[error("Transaction amount must be greater than zero, got {0}")]
    NonPositiveAmount(Amount),
    #[error("Insufficient balance for {address}: has {balance}, needs {requested}")]
    InsufficientBalance {
        address: String,
        balance: Amount,
        requested: Amount,
    },
    #[error("Cannot add invalid transaction to chain")]
    InvalidSignature,
    #[error("Invalid public identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),
    #[error("Genesis block does not match the expected genesis")]
    InvalidGenesis,
    #[error("Invalid block at index {index}: {reason}")]
    InvalidBlock { index: usize, reason: String },
    #[error("Block at index {0} does not link to its predecessor")]
    InvalidBlockLinkage(usize),
    #[error("Mining was cancelled")]
    MiningCancelled,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ChainError {
    fn from(err: std::io::Error) -> Self {
        ChainError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::ConfigError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
