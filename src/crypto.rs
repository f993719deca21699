//! Cryptographic primitives for TallyChain

use crate::error::ChainError;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use secp256k1::{constants::SECRET_KEY_SIZE, ecdsa::Signature, All, Message, PublicKey, Secp256k1, SecretKey};

/// A thread-safe, lazily initialized Secp256k1 context.
static SECP256K1_CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// Hex-encoded public key; doubles as a wallet address.
pub type Address = String;

/// A 32-byte SHA-256 digest.
pub type Sha256Hash = [u8; 32];

/// Derives the public identifier (hex of the uncompressed SEC1 public key) for a secret key.
pub fn derive_public_identifier(secret_key: &SecretKey) -> Address {
    let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, secret_key);
    hex::encode(public_key.serialize_uncompressed())
}

/// Signs a digest and returns the DER-encoded signature bytes.
pub fn sign_digest(secret_key: &SecretKey, digest: &Sha256Hash) -> Vec<u8> {
    let message = Message::from_digest(*digest);
    let signature = SECP256K1_CONTEXT.sign_ecdsa(&message, secret_key);
    signature.serialize_der().to_vec()
}

/// Checks a DER signature over `digest` against the public key encoded in `identifier`.
///
/// A malformed identifier is an error. A signature that does not parse or does
/// not match yields `Ok(false)`.
pub fn verify_signature(
    identifier: &str,
    digest: &Sha256Hash,
    signature_bytes: &[u8],
) -> Result<bool, ChainError> {
    let public_key = parse_identifier(identifier)?;

    let mut signature = match Signature::from_der(signature_bytes) {
        Ok(sig) => sig,
        Err(_) => return Ok(false),
    };
    signature.normalize_s();

    let message = Message::from_digest(*digest);
    Ok(SECP256K1_CONTEXT
        .verify_ecdsa(&message, &signature, &public_key)
        .is_ok())
}

/// Parses a hex identifier into a public key.
pub fn parse_identifier(identifier: &str) -> Result<PublicKey, ChainError> {
    let bytes = hex::decode(identifier)
        .map_err(|e| ChainError::InvalidIdentifier(format!("not hex: {}", e)))?;
    PublicKey::from_slice(&bytes).map_err(|e| ChainError::InvalidIdentifier(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random KeyPair using the OS random number generator.
    pub fn generate() -> Self {
        let secret_key = SecretKey::new(&mut OsRng);
        Self::from_secret_key(secret_key)
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(&SECP256K1_CONTEXT, &secret_key);
        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Creates a KeyPair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let secret_key = SecretKey::from_slice(bytes).map_err(|e| {
            if bytes.len() != SECRET_KEY_SIZE {
                ChainError::InvalidSecretKey(format!(
                    "Secret key must be {} bytes, got {}",
                    SECRET_KEY_SIZE,
                    bytes.len()
                ))
            } else {
                ChainError::InvalidSecretKey(e.to_string())
            }
        })?;

        Ok(Self::from_secret_key(secret_key))
    }

    /// Creates a KeyPair from a hex-encoded secret key.
    pub fn from_secret_hex(hex_str: &str) -> Result<Self, ChainError> {
        let bytes = hex::decode(hex_str.trim())
            .map_err(|e| ChainError::InvalidSecretKey(format!("Invalid hex secret key: {}", e)))?;
        Self::from_secret_bytes(&bytes)
    }

    /// The wallet address belonging to this key.
    pub fn public_identifier(&self) -> Address {
        hex::encode(self.public_key.serialize_uncompressed())
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    pub fn sign_digest(&self, digest: &Sha256Hash) -> Vec<u8> {
        sign_digest(&self.secret_key, digest)
    }
}
