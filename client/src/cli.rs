//! # CLI Interface
//!
//! Command-line structure for `tfchain-client`, defined with `clap` derive.
//! Runtime configuration comes from flags with environment fallbacks.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Public explorers queried when `--explorers` is not given.
pub const DEFAULT_EXPLORERS: &str =
    "https://explorer.threefoldtoken.com,https://explorer2.threefoldtoken.com";

/// TFChain transaction inspection and explorer client.
///
/// Decodes transaction JSON into its binary form, signature hashes and
/// output ids, normalizes lock times, computes 3Bot fees and queries the
/// public explorers.
#[derive(Parser, Debug)]
#[command(
    name = "tfchain-client",
    about = "TFChain transaction inspection and explorer client",
    version,
    propagate_version = true
)]
pub struct TfchainCli {
    /// Log output format: pretty or json.
    #[arg(long, global = true, env = "TFCHAIN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a transaction and print its encodings, hashes and output ids.
    Decode(DecodeArgs),
    /// Print the signature hash of a transaction for one extra object.
    Sighash(SighashArgs),
    /// Normalize a lock time (height, timestamp, date or +duration).
    Lock(LockArgs),
    /// Print the monthly 3Bot fee for a number of months.
    Fees(FeesArgs),
    /// Query the explorer network.
    Explorer(ExplorerArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Transaction JSON file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct SighashArgs {
    /// Transaction JSON file, or `-` for stdin.
    pub input: PathBuf,

    /// Extra object mixed into the hash: an input index, `sender` or `receiver`.
    #[arg(long, short = 'e', default_value = "0")]
    pub extra: String,
}

#[derive(Args, Debug)]
pub struct LockArgs {
    /// Block height, unix timestamp, `DD/MM/YYYY[ HH:MM[:SS]]` or `+7d12h`.
    pub value: String,

    /// Timezone for dates, in seconds east of UTC. Defaults to local time.
    #[arg(long, env = "TFCHAIN_UTC_OFFSET", allow_hyphen_values = true)]
    pub offset: Option<i32>,
}

#[derive(Args, Debug)]
pub struct FeesArgs {
    /// Number of months, at most 24.
    #[arg(value_parser = clap::value_parser!(u8).range(0..=24))]
    pub months: u8,
}

#[derive(Args, Debug)]
pub struct ExplorerArgs {
    /// Comma-separated explorer base URLs, tried in random order.
    #[arg(
        long,
        global = true,
        env = "TFCHAIN_EXPLORERS",
        value_delimiter = ',',
        default_value = DEFAULT_EXPLORERS
    )]
    pub explorers: Vec<String>,

    #[command(subcommand)]
    pub command: ExplorerCommand,
}

#[derive(Subcommand, Debug)]
pub enum ExplorerCommand {
    /// GET an endpoint, e.g. `/explorer/constants`.
    Get {
        endpoint: String,
    },
    /// POST a JSON document read from a file (or `-` for stdin).
    Post {
        endpoint: String,
        #[arg(default_value = "-")]
        input: PathBuf,
    },
}
