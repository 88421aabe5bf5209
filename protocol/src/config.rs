//! # Protocol Configuration & Constants
//!
//! Every magic number of the TFChain wire format lives here. These values
//! are fixed by the chain itself: change one and every signature hash,
//! output id and unlock hash this library produces stops matching what the
//! daemons compute.

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Human-readable name of the coin unit.
pub const CURRENCY_UNIT: &str = "TFT";

/// Number of decimal digits between one TFT and its smallest unit.
pub const CURRENCY_PRECISION: u32 = 9;

/// Smallest units per TFT (`10^CURRENCY_PRECISION`).
pub const CURRENCY_UNITS_PER_COIN: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Output size of the protocol hash (BLAKE2b-256).
pub const HASH_SIZE: usize = 32;

/// Length of the checksum appended to the string form of an unlock hash.
pub const UNLOCKHASH_CHECKSUM_SIZE: usize = 6;

/// Length of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Length of an Ed25519 signature.
pub const ED25519_SIGNATURE_SIZE: usize = 64;

/// Length of the nonce carried by minting transactions.
pub const MINTING_NONCE_SIZE: usize = 8;

/// Length of an atomic swap secret (and of its hash).
pub const ATOMIC_SWAP_SECRET_SIZE: usize = 32;

/// Length of an ERC20 (Ethereum) address.
pub const ERC20_ADDRESS_SIZE: usize = 20;

/// Length of an ERC20 block or transaction hash.
pub const ERC20_HASH_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Lock Times
// ---------------------------------------------------------------------------

/// Lock values below this threshold are block heights, values at or above
/// it are unix timestamps (seconds).
pub const LOCKTIME_THRESHOLD: u64 = 500_000_000;

// ---------------------------------------------------------------------------
// Specifiers
// ---------------------------------------------------------------------------

/// Pads an ASCII label into the 16-byte specifier field used throughout
/// the Sia encoding. Labels longer than 16 bytes are truncated.
pub const fn specifier(label: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut i = 0;
    while i < label.len() && i < 16 {
        out[i] = label[i];
        i += 1;
    }
    out
}

/// Specifier of the Ed25519 public key algorithm.
pub const SPECIFIER_ED25519: [u8; 16] = specifier(b"ed25519");

/// Output id domain for coin outputs.
pub const SPECIFIER_COIN_OUTPUT: [u8; 16] = specifier(b"coin output");

/// Output id domain for block stake outputs.
pub const SPECIFIER_BLOCKSTAKE_OUTPUT: [u8; 16] = specifier(b"blstake output");

/// Signature hash domain of the minter definition transaction (v128).
pub const SPECIFIER_MINTER_DEFINITION_TX: [u8; 16] = specifier(b"minter defin tx");

/// Signature hash domain of the coin creation transaction (v129).
pub const SPECIFIER_COIN_CREATION_TX: [u8; 16] = specifier(b"coin mint tx");

/// Signature hash domain of the 3Bot registration transaction (v144).
pub const SPECIFIER_BOT_REGISTRATION_TX: [u8; 16] = specifier(b"bot register tx");

/// Signature hash domain of the 3Bot record update transaction (v145).
pub const SPECIFIER_BOT_RECORD_UPDATE_TX: [u8; 16] = specifier(b"bot recupdate tx");

/// Signature hash domain of the 3Bot name transfer transaction (v146).
pub const SPECIFIER_BOT_NAME_TRANSFER_TX: [u8; 16] = specifier(b"bot nametrans tx");

/// Signature hash domain of the ERC20 convert transaction (v208).
pub const SPECIFIER_ERC20_CONVERT_TX: [u8; 16] = specifier(b"erc20 convert tx");

/// Signature hash domain of the ERC20 coin creation transaction (v209).
pub const SPECIFIER_ERC20_COIN_CREATION_TX: [u8; 16] = specifier(b"erc20 coingen tx");

/// Signature hash domain of the ERC20 address registration transaction (v210).
pub const SPECIFIER_ERC20_ADDRESS_REGISTRATION_TX: [u8; 16] = specifier(b"erc20 addrreg tx");

/// Extra object mixed into a 3Bot signature hash by the sending bot.
pub const SPECIFIER_SENDER: &[u8] = b"sender";

/// Extra object mixed into a 3Bot signature hash by the receiving bot.
pub const SPECIFIER_RECEIVER: &[u8] = b"receiver";

// ---------------------------------------------------------------------------
// 3Bot Fees (in whole TFT)
// ---------------------------------------------------------------------------

/// One-time fee for registering a new 3Bot.
pub const BOT_FEE_REGISTRATION: u64 = 90;

/// Fee per name beyond the first one a bot registers, or per name added.
pub const BOT_FEE_ADDITIONAL_NAME: u64 = 50;

/// Flat fee charged whenever a record update touches network addresses.
pub const BOT_FEE_NETWORK_ADDRESS_UPDATE: u64 = 20;

/// Base fee per prepaid month.
pub const BOT_FEE_MONTHLY: u64 = 10;

/// Maximum number of months that can be paid in one transaction.
pub const BOT_MONTHS_MAX: u8 = 24;

/// Maximum number of network addresses or names listed in one field.
pub const BOT_RECORD_ENTRIES_MAX: usize = 15;

/// Fee for registering an ERC20 withdrawal address (in whole TFT).
pub const ERC20_ADDRESS_REGISTRATION_FEE: u64 = 10;

// ---------------------------------------------------------------------------
// Transaction Versions
// ---------------------------------------------------------------------------

pub const TRANSACTION_VERSION_LEGACY: u8 = 0;
pub const TRANSACTION_VERSION_STANDARD: u8 = 1;
pub const TRANSACTION_VERSION_MINTER_DEFINITION: u8 = 128;
pub const TRANSACTION_VERSION_COIN_CREATION: u8 = 129;
pub const TRANSACTION_VERSION_BOT_REGISTRATION: u8 = 144;
pub const TRANSACTION_VERSION_BOT_RECORD_UPDATE: u8 = 145;
pub const TRANSACTION_VERSION_BOT_NAME_TRANSFER: u8 = 146;
pub const TRANSACTION_VERSION_ERC20_CONVERSION: u8 = 208;
pub const TRANSACTION_VERSION_ERC20_COIN_CREATION: u8 = 209;
pub const TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION: u8 = 210;
