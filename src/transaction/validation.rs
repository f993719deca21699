/// Validation logic for transactions separated from type definitions
use crate::crypto::verify_signature;
use crate::error::ChainError;
use crate::transaction::types::{Transaction, TransferTx};

impl Transaction {
    /// Reward transactions are always valid; transfers must carry a signature
    /// from the sender's key over the current digest.
    pub fn is_valid(&self) -> Result<bool, ChainError> {
        match self {
            Transaction::Reward(_) => Ok(true),
            Transaction::Transfer(tx) => tx.is_valid(),
        }
    }
}

impl TransferTx {
    pub fn is_valid(&self) -> Result<bool, ChainError> {
        let signature = match &self.signature {
            Some(sig) if !sig.is_empty() => sig,
            _ => return Err(ChainError::MissingSignature),
        };

        verify_signature(&self.sender, &self.calculate_digest(), signature)
    }
}
