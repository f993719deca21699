#![forbid(unsafe_code)]
//! Generates a secp256k1 keypair, or derives the address of an existing key.

use clap::Parser;
use colored::*;
use tallychain::crypto::KeyPair;

#[derive(Parser)]
#[command(name = "tallychain-keygen", about = "Create a TallyChain wallet key")]
struct Cli {
    /// Derive the address for this hex secret key instead of generating one
    #[arg(long)]
    secret: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let keypair = match cli.secret {
        Some(secret) => KeyPair::from_secret_hex(&secret)?,
        None => KeyPair::generate(),
    };

    println!();
    println!(
        "{}",
        "Your public key (also your wallet address, freely shareable)".bright_green()
    );
    println!("  {}", keypair.public_identifier().bright_white());
    println!();
    println!(
        "{}",
        "Your private key (keep this secret! To sign transactions)".bright_red()
    );
    println!("  {}", keypair.secret_hex().bright_white());

    Ok(())
}
