/// Transaction types for TallyChain
use crate::crypto::{Address, KeyPair, Sha256Hash};
use crate::error::ChainError;
use sha2::{Digest, Sha256};

/// Value carried by a transaction.
pub type Amount = i64;

/// A transaction that can occur in a block
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Transaction {
    Transfer(TransferTx),
    Reward(RewardTx),
}

impl Transaction {
    /// `None` for reward transactions, which are minted by the ledger.
    pub fn sender(&self) -> Option<&str> {
        match self {
            Transaction::Transfer(tx) => Some(&tx.sender),
            Transaction::Reward(_) => None,
        }
    }

    pub fn recipient(&self) -> &str {
        match self {
            Transaction::Transfer(tx) => &tx.recipient,
            Transaction::Reward(tx) => &tx.recipient,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Transaction::Transfer(tx) => tx.amount,
            Transaction::Reward(tx) => tx.amount,
        }
    }

    pub fn created_at(&self) -> i64 {
        match self {
            Transaction::Transfer(tx) => tx.created_at,
            Transaction::Reward(tx) => tx.created_at,
        }
    }

    pub fn signature(&self) -> Option<&[u8]> {
        match self {
            Transaction::Transfer(tx) => tx.signature.as_deref(),
            Transaction::Reward(_) => None,
        }
    }

    /// Involves `address` as sender or recipient.
    pub fn involves(&self, address: &str) -> bool {
        self.sender() == Some(address) || self.recipient() == address
    }

    /// SHA-256 over sender, recipient, amount and creation time, in that order.
    pub fn calculate_digest(&self) -> Sha256Hash {
        digest_fields(self.sender(), self.recipient(), self.amount(), self.created_at())
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.calculate_digest())
    }
}

fn update_len_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

pub(crate) fn digest_fields(
    sender: Option<&str>,
    recipient: &str,
    amount: Amount,
    created_at: i64,
) -> Sha256Hash {
    let mut hasher = Sha256::new();
    match sender {
        Some(sender) => {
            hasher.update([1u8]);
            update_len_prefixed(&mut hasher, sender.as_bytes());
        }
        None => hasher.update([0u8]),
    }
    update_len_prefixed(&mut hasher, recipient.as_bytes());
    hasher.update(amount.to_le_bytes());
    hasher.update(created_at.to_le_bytes());
    hasher.finalize().into()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Reward transaction: minted by the ledger for the miner of a block
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RewardTx {
    pub recipient: Address,
    pub amount: Amount,
    pub created_at: i64,
}

impl RewardTx {
    pub fn new(recipient: impl Into<Address>, amount: Amount) -> Self {
        RewardTx {
            recipient: recipient.into(),
            amount,
            created_at: now_millis(),
        }
    }
}

/// Transfer transaction: moves `amount` from `sender` to `recipient`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransferTx {
    pub sender: Address,
    pub recipient: Address,
    pub amount: Amount,
    pub created_at: i64,
    #[serde(default, with = "hex_signature")]
    pub signature: Option<Vec<u8>>,
}

impl TransferTx {
    pub fn new(sender: impl Into<Address>, recipient: impl Into<Address>, amount: Amount) -> Self {
        TransferTx {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            created_at: now_millis(),
            signature: None,
        }
    }

    /// Replaces the creation time, for reproducible digests.
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn calculate_digest(&self) -> Sha256Hash {
        digest_fields(Some(&self.sender), &self.recipient, self.amount, self.created_at)
    }

    /// Signs the transaction. The key must belong to the sender.
    /// Re-signing overwrites the previous signature.
    pub fn sign(&mut self, keypair: &KeyPair) -> Result<(), ChainError> {
        if keypair.public_identifier() != self.sender {
            return Err(ChainError::WrongSigningKey);
        }

        let digest = self.calculate_digest();
        self.signature = Some(keypair.sign_digest(&digest));
        Ok(())
    }

    pub fn signature_hex(&self) -> Option<String> {
        self.signature.as_ref().map(hex::encode)
    }
}

impl From<TransferTx> for Transaction {
    fn from(tx: TransferTx) -> Self {
        Transaction::Transfer(tx)
    }
}

impl From<RewardTx> for Transaction {
    fn from(tx: RewardTx) -> Self {
        Transaction::Reward(tx)
    }
}

mod hex_signature {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(sig: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match sig {
            Some(bytes) => s.serialize_some(&hex::encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|s| hex::decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
