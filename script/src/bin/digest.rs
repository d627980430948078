//! Print the EIP-712 digest and Merkle leaf an airdrop derives for a claim,
//! for checking off-chain signers and tree builders against it.

use airdrop_lib::eip712::{claim_struct_hash, domain_separator, typed_data_digest};
use airdrop_lib::merkle::claim_leaf;
use airdrop_lib::util::{hex0x, parse_hex, to_u256};
use airdrop_lib::{Address, ClaimMessage};
use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute claim digest and leaf", long_about = None)]
struct Args {
    /// Chain id the airdrop was deployed on
    #[arg(long, env = "AIRDROP_CHAIN_ID", default_value_t = 1)]
    chain_id: u64,

    /// 0x-prefixed airdrop contract address (EIP-712 verifying contract)
    #[arg(long, env = "AIRDROP_CONTRACT")]
    contract: String,

    /// 0x-prefixed recipient address
    #[arg(long)]
    recipient: String,

    /// Decimal amount
    #[arg(long)]
    amount: String,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    chain_id: u64,
    contract: String,
    recipient: String,
    amount: String,
    domain_separator: String,
    struct_hash: String,
    digest: String,
    leaf: String,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let contract: Address = parse_hex(&args.contract).map_err(|e| anyhow!("contract: {}", e))?;
    let recipient: Address = parse_hex(&args.recipient).map_err(|e| anyhow!("recipient: {}", e))?;
    let amount = to_u256(&args.amount).map_err(|e| anyhow!("amount: {}", e))?;
    let claim = ClaimMessage::new(recipient, amount);

    let separator = domain_separator(args.chain_id, &contract);
    let struct_hash = claim_struct_hash(&claim);
    let out = Output {
        chain_id: args.chain_id,
        contract: hex0x(contract),
        recipient: hex0x(recipient),
        amount: amount.to_string(),
        domain_separator: hex0x(separator),
        struct_hash: hex0x(struct_hash),
        digest: hex0x(typed_data_digest(&separator, &struct_hash)),
        leaf: hex0x(claim_leaf(&claim)),
    };

    let s = if args.pretty { serde_json::to_string_pretty(&out)? } else { serde_json::to_string(&out)? };
    println!("{}", s);
    Ok(())
}
