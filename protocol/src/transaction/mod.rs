//! # Transaction Module
//!
//! The versioned TFChain transaction family. Every version knows how to
//! write itself to the wire, render its canonical JSON and compute the
//! signature hash its signers have to sign.
//!
//! ## Architecture
//!
//! ```text
//! io.rs       : CoinInput, CoinOutput, BlockstakeOutput
//! standard.rs : v1 (and legacy v0) value transfers
//! minting.rs  : v128 minter definition, v129 coin creation
//! threebot.rs : v144 registration, v145 record update, v146 name transfer
//! erc20.rs    : v208 convert, v209 coin creation, v210 address registration
//! factory.rs  : TransactionFactory: JSON dispatch and empty constructors
//! builder.rs  : fluent builder for v1 transfers
//! ```
//!
//! ## Signature hashes
//!
//! A signature hash is BLAKE2b-256 over a version-specific byte string that
//! covers everything except the signatures themselves, plus an "extra"
//! object chosen by the signer: the index of the input being signed, or
//! the raw `"sender"` / `"receiver"` label for 3Bot signatures.
//!
//! ## Output ids
//!
//! - v1: `H(spec16(kind) || binary || u64 index)`
//! - v0: `H(spec16(kind) || binary[1..] || u64 index)`
//! - all other versions:
//!   `H(spec16(kind) || spec16(tx specifier) || binary[1..] || u64 index)`

pub mod builder;
pub mod erc20;
pub mod factory;
pub mod io;
pub mod minting;
pub mod standard;
pub mod threebot;

pub use builder::TransactionBuilder;
pub use erc20::{TransactionV208, TransactionV209, TransactionV210};
pub use factory::TransactionFactory;
pub use io::{BlockstakeInput, BlockstakeOutput, CoinInput, CoinOutput};
pub use minting::{TransactionV128, TransactionV129};
pub use standard::TransactionV1;
pub use threebot::{
    compute_monthly_bot_fees, BotIdentification, BotSignature, TransactionV144, TransactionV145,
    TransactionV146,
};

use serde_json::Value;

use crate::config::{
    SPECIFIER_BLOCKSTAKE_OUTPUT, SPECIFIER_COIN_OUTPUT, SPECIFIER_RECEIVER, SPECIFIER_SENDER,
};
use crate::crypto::blake2b_multi;
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};
use crate::types::{Currency, Hash, TypeError};

// ---------------------------------------------------------------------------
// SignatureExtra
// ---------------------------------------------------------------------------

/// The signer-chosen object mixed into a signature hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureExtra {
    /// Index of the input being signed, written as a u64.
    InputIndex(u64),
    /// The sending (or registering) bot, written as the raw bytes `sender`.
    Sender,
    /// The receiving bot, written as the raw bytes `receiver`.
    Receiver,
}

impl From<u64> for SignatureExtra {
    fn from(index: u64) -> Self {
        SignatureExtra::InputIndex(index)
    }
}

impl SiaEncodable for SignatureExtra {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        match self {
            SignatureExtra::InputIndex(index) => encoder.add_int64(*index),
            SignatureExtra::Sender => {
                encoder.add_raw_bytes(SPECIFIER_SENDER);
                Ok(())
            }
            SignatureExtra::Receiver => {
                encoder.add_raw_bytes(SPECIFIER_RECEIVER);
                Ok(())
            }
        }
    }
}

impl RivineEncodable for SignatureExtra {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        match self {
            SignatureExtra::InputIndex(index) => encoder.add_int64(*index),
            SignatureExtra::Sender => {
                encoder.add_raw_bytes(SPECIFIER_SENDER);
                Ok(())
            }
            SignatureExtra::Receiver => {
                encoder.add_raw_bytes(SPECIFIER_RECEIVER);
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionVariant
// ---------------------------------------------------------------------------

/// Behaviour shared by every transaction version.
///
/// Accessors default to "nothing of that kind" so each version only
/// overrides what it actually carries.
pub trait TransactionVariant {
    /// The version byte.
    fn version(&self) -> u8;

    /// The wire encoding, version byte first.
    fn binary_encode(&self) -> Result<Vec<u8>, TypeError>;

    /// Canonical `{"version": N, "data": {...}}` JSON.
    fn json(&self) -> Value;

    /// The hash a signer signs.
    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError>;

    fn coin_inputs(&self) -> &[CoinInput] {
        &[]
    }

    /// Mutable access for signing. Versions without coin inputs hand out
    /// an empty slice.
    fn coin_inputs_mut(&mut self) -> &mut [CoinInput] {
        &mut []
    }

    /// Coin outputs created by this transaction, including refunds and
    /// minted or bridged coins.
    fn coin_outputs(&self) -> Vec<CoinOutput> {
        Vec::new()
    }

    fn blockstake_inputs(&self) -> &[BlockstakeInput] {
        &[]
    }

    fn blockstake_outputs(&self) -> &[BlockstakeOutput] {
        &[]
    }

    fn miner_fees(&self) -> Vec<Currency> {
        Vec::new()
    }

    fn arbitrary_data(&self) -> &[u8] {
        &[]
    }

    /// Id of the coin output at `index`.
    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError>;

    /// Id of the block stake output at `index`.
    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError>;
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Any supported transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// v1, or a v0 transaction normalized into the v1 model.
    Standard(TransactionV1),
    MinterDefinition(TransactionV128),
    CoinCreation(TransactionV129),
    BotRegistration(TransactionV144),
    BotRecordUpdate(TransactionV145),
    BotNameTransfer(TransactionV146),
    ERC20Convert(TransactionV208),
    ERC20CoinCreation(TransactionV209),
    ERC20AddressRegistration(TransactionV210),
}

macro_rules! dispatch {
    ($self:expr, $txn:ident => $body:expr) => {
        match $self {
            Transaction::Standard($txn) => $body,
            Transaction::MinterDefinition($txn) => $body,
            Transaction::CoinCreation($txn) => $body,
            Transaction::BotRegistration($txn) => $body,
            Transaction::BotRecordUpdate($txn) => $body,
            Transaction::BotNameTransfer($txn) => $body,
            Transaction::ERC20Convert($txn) => $body,
            Transaction::ERC20CoinCreation($txn) => $body,
            Transaction::ERC20AddressRegistration($txn) => $body,
        }
    };
}

impl Transaction {
    /// Same as [`TransactionFactory::from_json`].
    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        TransactionFactory::from_json(value)
    }
}

impl TransactionVariant for Transaction {
    fn version(&self) -> u8 {
        dispatch!(self, txn => txn.version())
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        dispatch!(self, txn => txn.binary_encode())
    }

    fn json(&self) -> Value {
        dispatch!(self, txn => txn.json())
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        dispatch!(self, txn => txn.signature_hash_get(extra))
    }

    fn coin_inputs(&self) -> &[CoinInput] {
        dispatch!(self, txn => txn.coin_inputs())
    }

    fn coin_inputs_mut(&mut self) -> &mut [CoinInput] {
        dispatch!(self, txn => txn.coin_inputs_mut())
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        dispatch!(self, txn => txn.coin_outputs())
    }

    fn blockstake_inputs(&self) -> &[BlockstakeInput] {
        dispatch!(self, txn => txn.blockstake_inputs())
    }

    fn blockstake_outputs(&self) -> &[BlockstakeOutput] {
        dispatch!(self, txn => txn.blockstake_outputs())
    }

    fn miner_fees(&self) -> Vec<Currency> {
        dispatch!(self, txn => txn.miner_fees())
    }

    fn arbitrary_data(&self) -> &[u8] {
        dispatch!(self, txn => txn.arbitrary_data())
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        dispatch!(self, txn => txn.coin_outputid_new(index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        dispatch!(self, txn => txn.blockstake_outputid_new(index))
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Which kind of output an id is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    Coin,
    Blockstake,
}

impl OutputKind {
    fn specifier(self) -> [u8; 16] {
        match self {
            OutputKind::Coin => SPECIFIER_COIN_OUTPUT,
            OutputKind::Blockstake => SPECIFIER_BLOCKSTAKE_OUTPUT,
        }
    }
}

/// `H(spec16(kind) || body || u64 index)`.
pub(crate) fn output_id(kind: OutputKind, body: &[u8], index: u64) -> Hash {
    let spec = kind.specifier();
    let index = index.to_le_bytes();
    Hash::from(blake2b_multi(&[&spec, body, &index]))
}

/// `H(spec16(kind) || spec16(tx) || binary[1..] || u64 index)`, used by
/// every version past v1.
pub(crate) fn extension_output_id(
    kind: OutputKind,
    tx_specifier: &[u8; 16],
    binary: &[u8],
    index: u64,
) -> Hash {
    let spec = kind.specifier();
    let index = index.to_le_bytes();
    let body = binary.get(1..).unwrap_or_default();
    Hash::from(blake2b_multi(&[&spec, tx_specifier, body, &index]))
}

/// `u64 #inputs || parentids`, the way every signature hash commits to
/// the inputs without their fulfillments.
pub(crate) fn sia_add_parent_ids(
    encoder: &mut SiaEncoder,
    inputs: &[CoinInput],
) -> Result<(), EncodingError> {
    encoder.add_int64(inputs.len() as u64)?;
    for input in inputs {
        encoder.add(&input.parent_id)?;
    }
    Ok(())
}

pub(crate) fn rivine_add_parent_ids(
    encoder: &mut RivineEncoder,
    inputs: &[CoinInput],
) -> Result<(), EncodingError> {
    encoder.add_int64(inputs.len() as u64)?;
    for input in inputs {
        encoder.add(&input.parent_id)?;
    }
    Ok(())
}

/// Optional refund output: `0x01 || output` when present, `0x00` otherwise.
pub(crate) fn sia_add_optional(
    encoder: &mut SiaEncoder,
    output: Option<&CoinOutput>,
) -> Result<(), EncodingError> {
    match output {
        Some(output) => {
            encoder.add_bool(true);
            encoder.add(output)
        }
        None => {
            encoder.add_bool(false);
            Ok(())
        }
    }
}

pub(crate) fn rivine_add_optional(
    encoder: &mut RivineEncoder,
    output: Option<&CoinOutput>,
) -> Result<(), EncodingError> {
    match output {
        Some(output) => {
            encoder.add_bool(true);
            encoder.add(output)
        }
        None => {
            encoder.add_bool(false);
            Ok(())
        }
    }
}

/// Hash the bytes an encoder collected.
pub(crate) fn hash_of(bytes: &[u8]) -> Hash {
    Hash::from(blake2b_multi(&[bytes]))
}
