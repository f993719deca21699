#![forbid(unsafe_code)]
//! Scripted walk through the ledger: mine, send, mine again, then report.

use clap::Parser;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use tallychain::config::load_config;
use tallychain::crypto::KeyPair;
use tallychain::{Blockchain, Transaction, TransferTx};
use tracing_subscriber::EnvFilter;

const DEMO_SECRET: &str = "7c4c45907dec40c91bab3480c39032e90049f1a44f3e18c3e07c23e3273995cf";

#[derive(Parser)]
#[command(name = "tallychain-demo", about = "Run a scripted TallyChain session")]
struct Cli {
    /// Hex secret key of the demo wallet
    #[arg(long, default_value = DEMO_SECRET)]
    key: String,

    /// Recipient of the scripted transfers
    #[arg(long, default_value = "address1")]
    recipient: String,

    /// Number of send-then-mine rounds after the first reward
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Amount sent each round
    #[arg(long, default_value_t = 50)]
    amount: i64,

    /// Ledger configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Modify the first transfer after mining to show tamper detection
    #[arg(long)]
    tamper: bool,

    /// Dump the chain as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let key = KeyPair::from_secret_hex(&cli.key)?;
    let wallet = key.public_identifier();

    let mut chain = Blockchain::with_config(&config.ledger);
    chain.mine_pending_transactions(wallet.clone());

    for round in 1..=cli.rounds {
        let mut tx = TransferTx::new(wallet.clone(), cli.recipient.clone(), cli.amount);
        tx.sign(&key)?;
        match chain.add_transaction(tx.into()) {
            Ok(()) => println!("{} transfer {} queued", "✓".green(), round),
            Err(e) => println!("{} transfer {} rejected: {}", "✗".red(), round, e),
        }
        chain.mine_pending_transactions(wallet.clone());
    }

    if cli.tamper {
        let target = chain
            .blocks
            .iter_mut()
            .flat_map(|b| b.transactions.iter_mut())
            .find_map(|tx| match tx {
                Transaction::Transfer(t) => Some(t),
                Transaction::Reward(_) => None,
            });
        if let Some(tx) = target {
            tx.amount += 1;
            println!("{}", "Tampered with the first transfer".yellow());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(chain.chain())?);
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Hash", "Previous", "Nonce", "Txs"]);
        for (i, block) in chain.chain().iter().enumerate() {
            table.add_row(vec![
                i.to_string(),
                block.hash.clone(),
                block.previous_hash.clone(),
                block.nonce.to_string(),
                block.transactions.len().to_string(),
            ]);
        }
        println!("{table}");
    }

    println!();
    println!(
        "Balance of {}: {}",
        "demo wallet".bright_cyan(),
        chain.get_balance_of_address(&wallet)
    );
    println!(
        "Balance of {}: {}",
        cli.recipient.bright_cyan(),
        chain.get_balance_of_address(&cli.recipient)
    );

    let valid = chain.is_chain_valid();
    println!(
        "Blockchain valid? {}",
        if valid { "Yes".green() } else { "No".red() }
    );

    Ok(())
}
