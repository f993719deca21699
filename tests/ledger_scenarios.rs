//! Integration tests for the ledger lifecycle and tamper detection

use tallychain::blockchain::Blockchain;
use tallychain::crypto::KeyPair;
use tallychain::error::ChainError;
use tallychain::transaction::{Amount, Transaction, TransferTx};

const KEY_A: &str = "3d6f54430830d388052865b95c10b4aeb1bbe33c01334cf2cfa8b520062a0ce3";
const KEY_B: &str = "7c4c45907dec40c91bab3480c39032e90049f1a44f3e18c3e07c23e3273995cf";

fn key(secret: &str) -> KeyPair {
    KeyPair::from_secret_hex(secret).unwrap()
}

fn signed(from: &KeyPair, to: &str, amount: Amount) -> Transaction {
    let mut tx = TransferTx::new(from.public_identifier(), to, amount);
    tx.sign(from).unwrap();
    tx.into()
}

/// Genesis, a reward to A, then A -> "wallet2" for 10 mined to A.
fn chain_with_transfer() -> (Blockchain, KeyPair) {
    let a = key(KEY_A);
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.public_identifier());
    chain.add_transaction(signed(&a, "wallet2", 10)).unwrap();
    chain.mine_pending_transactions(a.public_identifier());
    (chain, a)
}

#[test]
fn test_first_reward() {
    let a = key(KEY_A).public_identifier();
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.clone());

    assert_eq!(chain.get_balance_of_address(&a), 100);
    assert_eq!(chain.len(), 2);
    assert!(chain.chain()[1].hash.starts_with("00"));
    assert!(chain.is_chain_valid());
}

#[test]
fn test_transfer_moves_value() {
    let a = key(KEY_A);
    let b = key(KEY_B).public_identifier();
    let c = "miner-c";

    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.public_identifier());
    chain.add_transaction(signed(&a, &b, 10)).unwrap();
    chain.mine_pending_transactions(c);

    assert_eq!(chain.get_balance_of_address(&a.public_identifier()), 90);
    assert_eq!(chain.get_balance_of_address(&b), 10);
    assert_eq!(chain.get_balance_of_address(c), 100);
    assert!(chain.is_chain_valid());
}

#[test]
fn test_overdraft_rejected_and_pool_unchanged() {
    let a = key(KEY_A);
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.public_identifier());
    chain.add_transaction(signed(&a, "wallet2", 40)).unwrap();

    let result = chain.add_transaction(signed(&a, "wallet2", 101));
    assert!(matches!(
        result,
        Err(ChainError::InsufficientBalance { balance: 100, requested: 101, .. })
    ));
    assert_eq!(chain.pending_transactions().len(), 1);
}

#[test]
fn test_pending_pool_can_overdraw() {
    let a = key(KEY_A);
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.public_identifier());

    // each is checked against the mined balance only
    chain.add_transaction(signed(&a, "wallet2", 60)).unwrap();
    chain.add_transaction(signed(&a, "wallet2", 60)).unwrap();
    chain.mine_pending_transactions("miner");

    assert_eq!(chain.get_balance_of_address(&a.public_identifier()), -20);
    assert_eq!(chain.get_balance_of_address("wallet2"), 120);
}

#[test]
fn test_self_transfer_keeps_balance() {
    let a = key(KEY_A);
    let addr = a.public_identifier();
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(addr.clone());

    chain.add_transaction(signed(&a, &addr, 70)).unwrap();
    chain.mine_pending_transactions("miner");

    assert_eq!(chain.get_balance_of_address(&addr), 100);
}

#[test]
fn test_reduce_wallet_balance() {
    let (chain, a) = chain_with_transfer();
    assert_eq!(chain.get_balance_of_address(&a.public_identifier()), 190);
    assert_eq!(chain.get_balance_of_address("wallet2"), 10);
}

#[test]
fn test_wallet_history() {
    let a = key(KEY_A);
    let mut chain = Blockchain::new();
    chain.mine_pending_transactions(a.public_identifier());

    let tx = signed(&a, "wallet2", 10);
    chain.add_transaction(tx.clone()).unwrap();
    chain.add_transaction(tx.clone()).unwrap();
    chain.mine_pending_transactions("b2");
    chain.add_transaction(tx.clone()).unwrap();
    chain.add_transaction(tx).unwrap();
    chain.mine_pending_transactions("b2");

    let rewards = chain.get_all_transactions_for_wallet("b2");
    assert_eq!(rewards.len(), 2);
    for tx in rewards {
        assert_eq!(tx.amount(), 100);
        assert_eq!(tx.sender(), None);
        assert_eq!(tx.recipient(), "b2");
    }
    assert_eq!(
        chain
            .get_all_transactions_for_wallet(&a.public_identifier())
            .len(),
        5
    );
}

#[test]
fn test_genesis_is_reproducible() {
    let chain = Blockchain::new();
    assert_eq!(chain.chain()[0], Blockchain::create_genesis_block());
    assert_eq!(Blockchain::create_genesis_block(), Blockchain::create_genesis_block());
    assert!(chain.is_chain_valid());
}

#[test]
fn test_untampered_chain_is_valid() {
    let (chain, _) = chain_with_transfer();
    assert_eq!(chain.validate_chain(), Ok(()));
    assert!(chain.is_chain_valid());
}

#[test]
fn test_tampered_genesis_timestamp() {
    let mut chain = Blockchain::new();
    chain.blocks[0].timestamp = 39708;
    assert_eq!(chain.validate_chain(), Err(ChainError::InvalidGenesis));
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_tampered_block_timestamp() {
    let (mut chain, _) = chain_with_transfer();
    chain.blocks[1].timestamp = 897397;
    assert!(matches!(
        chain.validate_chain(),
        Err(ChainError::InvalidBlock { index: 1, .. })
    ));
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_tampered_transaction_amount() {
    let (mut chain, _) = chain_with_transfer();
    match &mut chain.blocks[2].transactions[0] {
        Transaction::Transfer(tx) => tx.amount = 897397,
        Transaction::Reward(_) => panic!("expected the transfer first"),
    }
    assert!(matches!(
        chain.validate_chain(),
        Err(ChainError::InvalidBlock { index: 2, .. })
    ));
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_tampered_reward_amount() {
    let (mut chain, _) = chain_with_transfer();
    match &mut chain.blocks[1].transactions[0] {
        Transaction::Reward(tx) => tx.amount = 1_000_000,
        Transaction::Transfer(_) => panic!("expected a reward"),
    }
    // the reward is trusted, but the block hash no longer matches
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_tampered_previous_hash() {
    let (mut chain, _) = chain_with_transfer();
    let block = &mut chain.blocks[2];
    block.previous_hash = "00ff".to_string();
    block.hash = block.calculate_hash();

    assert_eq!(chain.validate_chain(), Err(ChainError::InvalidBlockLinkage(2)));
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_reordered_blocks() {
    let (mut chain, _) = chain_with_transfer();
    chain.blocks.swap(1, 2);
    assert!(!chain.is_chain_valid());
}

#[test]
fn test_higher_difficulty_chain() {
    let a = key(KEY_A).public_identifier();
    let mut chain = Blockchain::new();
    chain.difficulty = 3;
    chain.mine_pending_transactions(a.clone());

    assert!(chain.get_latest_block().hash.starts_with("000"));
    assert!(chain.is_chain_valid());
}
