//! Deploy an airdrop against an in-memory token and replay a scenario of
//! claim and admin calls, printing a JSON report of what happened.

use airdrop_lib::io::json::ScenarioJson;
use airdrop_lib::io::{scenario_to_json, scenario_to_native};
use airdrop_lib::samples::build_sample_scenario;
use airdrop_lib::scenario::Scenario;
use airdrop_lib::util::hex0x;
use airdrop_lib::{AirdropEvent, ClaimMethod};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay airdrop calls and report outcomes", long_about = None)]
struct Args {
    /// Scenario JSON: { deployment: {...}, calls: [{ kind, ... }] }
    #[arg(long, short = 'f')]
    file: Option<String>,

    /// Use the built-in sample scenario instead of reading a file
    #[arg(long, default_value_t = false)]
    sample: bool,

    /// Write the scenario JSON to this path before replaying it
    #[arg(long)]
    export: Option<String>,

    /// Only export the scenario and exit
    #[arg(long, default_value_t = false)]
    export_only: bool,

    /// Output report path (if omitted, print to stdout)
    #[arg(long)]
    out: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Log filter, e.g. "info" or "airdrop_lib=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallReport {
    index: usize,
    kind: &'static str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceReport {
    owner: String,
    amount: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    airdrop: String,
    domain_separator: String,
    signature_disabled: bool,
    calls: Vec<CallReport>,
    claimed: Vec<String>,
    balances: Vec<BalanceReport>,
    events: Vec<String>,
}

fn load_scenario(args: &Args) -> Result<Scenario> {
    if args.sample {
        return build_sample_scenario().map_err(|e| anyhow!(e)).context("building sample scenario");
    }
    let path = args.file.as_deref().context("provide --file <scenario.json> or --sample")?;
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let json: ScenarioJson = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path))?;
    scenario_to_native(&json).map_err(|e| anyhow!(e)).context("invalid scenario")
}

fn describe(event: &AirdropEvent) -> String {
    match event {
        AirdropEvent::Claimed { recipient, amount, method } => {
            let via = match method {
                ClaimMethod::Signature => "signature",
                ClaimMethod::Merkle => "merkle",
            };
            format!("Claimed({}, {}, {})", hex0x(recipient), amount, via)
        }
        AirdropEvent::SignatureVerificationDisabled { admin } => {
            format!("SignatureVerificationDisabled({})", hex0x(admin))
        }
        AirdropEvent::OwnershipTransferred { previous, new } => format!(
            "OwnershipTransferred({}, {})",
            previous.map(hex0x).unwrap_or_else(|| "none".into()),
            new.map(hex0x).unwrap_or_else(|| "none".into())
        ),
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool, out: Option<&str>) -> Result<()> {
    let s = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    match out {
        Some(path) => {
            std::fs::write(path, s).with_context(|| format!("writing {}", path))?;
            tracing::info!(path, "wrote output");
        }
        None => println!("{}", s),
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let scenario = load_scenario(&args)?;

    if let Some(path) = &args.export {
        write_json(&scenario_to_json(&scenario), true, Some(path))?;
    }
    if args.export_only {
        if args.export.is_none() {
            eprintln!("Nothing exported: provide --export <path>.");
        }
        return Ok(());
    }

    let replay = scenario.replay();
    let calls = scenario
        .calls
        .iter()
        .zip(&replay.outcomes)
        .enumerate()
        .map(|(index, (call, outcome))| CallReport {
            index,
            kind: call.kind(),
            ok: outcome.is_ok(),
            error: outcome.as_ref().err().map(|e| e.code()),
        })
        .collect::<Vec<_>>();

    let succeeded = calls.iter().filter(|c| c.ok).count();
    tracing::info!(calls = calls.len(), succeeded, "replay finished");

    let report = Report {
        airdrop: hex0x(replay.airdrop.address()),
        domain_separator: hex0x(replay.airdrop.domain_separator()),
        signature_disabled: replay.airdrop.signature_disabled(),
        calls,
        claimed: replay.airdrop.ledger().claimed().iter().map(hex0x).collect(),
        balances: replay
            .token
            .balances()
            .into_iter()
            .map(|(owner, amount)| BalanceReport { owner: hex0x(owner), amount: amount.to_string() })
            .collect(),
        events: replay.airdrop.events().iter().map(describe).collect(),
    };

    write_json(&report, args.pretty, args.out.as_deref())
}
