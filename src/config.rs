//! Configuration management for TallyChain

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD};
use crate::error::ChainError;
use crate::miner::MAX_DIFFICULTY;
use crate::transaction::Amount;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Leading zero hex digits required in a mined block hash.
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default = "default_mining_reward")]
    pub mining_reward: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            mining_reward: default_mining_reward(),
        }
    }
}

/// Upper bound on the block reward, leaving room for millions of mined
/// blocks before a replayed balance gets near `Amount::MAX`.
pub const MAX_MINING_REWARD: Amount = 1_000_000_000_000;

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_mining_reward() -> Amount {
    DEFAULT_MINING_REWARD
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ChainError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        if self.ledger.difficulty < 1 || self.ledger.difficulty > MAX_DIFFICULTY {
            return Err(ChainError::ConfigError(format!(
                "ledger.difficulty must be between 1 and {}",
                MAX_DIFFICULTY
            )));
        }
        if self.ledger.mining_reward <= 0 || self.ledger.mining_reward > MAX_MINING_REWARD {
            return Err(ChainError::ConfigError(format!(
                "ledger.mining_reward must be between 1 and {}",
                MAX_MINING_REWARD
            )));
        }
        Ok(())
    }
}

/// Loads `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    Config::from_toml_str(&config_str)
}
