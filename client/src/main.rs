// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # TFChain Client
//!
//! Entry point for the `tfchain-client` binary. Parses CLI arguments,
//! initializes logging and runs one subcommand:
//!
//! - `decode`  : binary form, signature hashes and output ids of a transaction
//! - `sighash` : a single signature hash
//! - `lock`    : normalize a lock time
//! - `fees`    : monthly 3Bot fee
//! - `explorer`: GET/POST against the explorer mirrors
//! - `version` : print build version information

mod cli;
mod explorer;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{FixedOffset, Local};
use clap::Parser;
use serde_json::Value;

use tfchain_protocol::transaction::{
    compute_monthly_bot_fees, SignatureExtra, Transaction, TransactionFactory, TransactionVariant,
};
use tfchain_protocol::types::OutputLock;

use cli::{Commands, ExplorerCommand, TfchainCli};
use explorer::ExplorerClient;
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TfchainCli::parse();
    logging::init_logging(
        "tfchain_client=info,tfchain_protocol=warn",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Decode(args) => decode(&args.input),
        Commands::Sighash(args) => sighash(&args.input, &args.extra),
        Commands::Lock(args) => lock(&args.value, args.offset),
        Commands::Fees(args) => {
            println!("{}", compute_monthly_bot_fees(args.months).str_with_unit());
            Ok(())
        }
        Commands::Explorer(args) => {
            let client = ExplorerClient::new(args.explorers)?;
            let body = match args.command {
                ExplorerCommand::Get { endpoint } => client.get(&endpoint).await?,
                ExplorerCommand::Post { endpoint, input } => {
                    let data = read_json(&input)?;
                    client.post(&endpoint, &data).await?
                }
            };
            println!("{}", body.trim_end());
            Ok(())
        }
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Reads a JSON document from `path`, or from stdin when `path` is `-`.
fn read_json(path: &Path) -> Result<Value> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).context("input is not valid JSON")
}

fn read_transaction(path: &Path) -> Result<Transaction> {
    let value = read_json(path)?;
    TransactionFactory::from_json(&value).context("failed to decode transaction")
}

fn decode(path: &Path) -> Result<()> {
    let txn = read_transaction(path)?;
    tracing::info!(version = txn.version(), "transaction decoded");

    println!("version      : {}", txn.version());
    println!("binary       : {}", hex::encode(txn.binary_encode()?));
    for index in 0..txn.coin_inputs().len() {
        let hash = txn.signature_hash_get(SignatureExtra::InputIndex(index as u64))?;
        println!("sighash[{index:>2}]  : {hash}");
    }
    if matches!(txn, Transaction::BotRegistration(_) | Transaction::BotRecordUpdate(_)) {
        println!("sighash bot  : {}", txn.signature_hash_get(SignatureExtra::Sender)?);
    }
    if let Transaction::BotNameTransfer(_) = txn {
        println!("sighash from : {}", txn.signature_hash_get(SignatureExtra::Sender)?);
        println!("sighash to   : {}", txn.signature_hash_get(SignatureExtra::Receiver)?);
    }
    for (index, output) in txn.coin_outputs().iter().enumerate() {
        let id = txn.coin_outputid_new(index as u64)?;
        println!("coinoutput   : {id} {} TFT", output.value);
    }
    for index in 0..txn.blockstake_outputs().len() {
        println!("bsoutput     : {}", txn.blockstake_outputid_new(index as u64)?);
    }
    Ok(())
}

fn parse_extra(extra: &str) -> Result<SignatureExtra> {
    match extra.to_lowercase().as_str() {
        "sender" => Ok(SignatureExtra::Sender),
        "receiver" => Ok(SignatureExtra::Receiver),
        other => match other.parse::<u64>() {
            Ok(index) => Ok(SignatureExtra::InputIndex(index)),
            Err(_) => bail!("extra must be an input index, `sender` or `receiver`, not {extra:?}"),
        },
    }
}

fn sighash(path: &Path, extra: &str) -> Result<()> {
    let extra = parse_extra(extra)?;
    let txn = read_transaction(path)?;
    println!("{}", txn.signature_hash_get(extra)?);
    Ok(())
}

fn lock(value: &str, offset: Option<i32>) -> Result<()> {
    let current = u64::try_from(Local::now().timestamp()).context("clock before 1970")?;
    let (lock, date) = match offset {
        Some(seconds) => {
            let tz = FixedOffset::east_opt(seconds)
                .with_context(|| format!("utc offset out of range: {seconds}"))?;
            let lock = OutputLock::parse_with(value, current, tz)?;
            (lock, lock.as_datetime(tz))
        }
        // each date takes the local offset in force on that date
        None => {
            let lock = OutputLock::parse_with(value, current, Local)?;
            let date = lock.as_datetime(Local).map(|d| d.with_timezone(d.offset()));
            (lock, date)
        }
    };

    match date {
        Some(date) => println!("{lock} ({})", date.format("%Y-%m-%d %H:%M:%S %:z")),
        None => println!("{lock} (block height)"),
    }
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    use tfchain_protocol::config::*;

    let versions = [
        TRANSACTION_VERSION_LEGACY,
        TRANSACTION_VERSION_STANDARD,
        TRANSACTION_VERSION_MINTER_DEFINITION,
        TRANSACTION_VERSION_COIN_CREATION,
        TRANSACTION_VERSION_BOT_REGISTRATION,
        TRANSACTION_VERSION_BOT_RECORD_UPDATE,
        TRANSACTION_VERSION_BOT_NAME_TRANSFER,
        TRANSACTION_VERSION_ERC20_CONVERSION,
        TRANSACTION_VERSION_ERC20_COIN_CREATION,
        TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION,
    ];
    let versions: Vec<String> = versions.iter().map(u8::to_string).collect();
    println!("tfchain-client {}", env!("CARGO_PKG_VERSION"));
    println!("transactions   {}", versions.join(", "));
}
