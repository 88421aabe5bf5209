//! Error types for ledger values.
//!
//! Every parse, JSON conversion or invariant check in [`crate::types`]
//! fails with a [`TypeError`]. Errors are raised where the problem is
//! detected and no half-built value is ever handed back.

use thiserror::Error;

use crate::encoding::EncodingError;

/// Errors that can occur while building or converting a ledger value.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A JSON value has the wrong shape.
    #[error("invalid JSON for '{field}': expected {expected}")]
    InvalidJson {
        /// Name of the offending field (or the type being parsed).
        field: String,
        /// Human description of the accepted shape.
        expected: &'static str,
    },

    /// A required JSON field is absent.
    #[error("missing required field '{0}'")]
    MissingField(String),

    /// The condition `type` tag is not one we know.
    #[error("unknown condition type: {0}")]
    UnknownConditionType(u64),

    /// The transaction `version` is not one we know.
    #[error("unknown transaction version: {0}")]
    UnknownTransactionVersion(u64),

    /// The fulfillment `type` tag is not one we know.
    #[error("unknown fulfillment type: {0}")]
    UnknownFulfillmentType(u64),

    /// The unlock hash type byte is not one we know.
    #[error("unknown unlock hash type: {0}")]
    UnknownUnlockHashType(u8),

    /// The public key algorithm prefix is not supported.
    #[error("unknown public key specifier: '{0}'")]
    UnknownPublicKeySpecifier(String),

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A base64 string could not be decoded.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// A utf8-mode binary string was not valid UTF-8.
    #[error("invalid utf-8 in binary data")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A currency string could not be parsed.
    #[error("invalid currency '{0}'")]
    InvalidCurrency(String),

    /// Subtracting currencies would go below zero.
    #[error("currency underflow: {lhs} - {rhs}")]
    CurrencyUnderflow {
        /// Left-hand side, in TFT.
        lhs: String,
        /// Right-hand side, in TFT.
        rhs: String,
    },

    /// A lock value (height, timestamp, duration or date) could not be parsed.
    #[error("invalid output lock '{0}'")]
    InvalidLock(String),

    /// An unlock hash string has the wrong length or shape.
    #[error("invalid unlock hash '{0}'")]
    InvalidUnlockHash(String),

    /// An unlock hash string carries a checksum that doesn't match.
    #[error("unlock hash checksum mismatch: expected {expected}, found {found}")]
    UnlockHashChecksumMismatch {
        /// Checksum computed from the type and hash.
        expected: String,
        /// Checksum carried by the string.
        found: String,
    },

    /// A public key string has the wrong shape or length.
    #[error("invalid public key '{0}'")]
    InvalidPublicKey(String),

    /// Fixed-size binary data got the wrong number of bytes.
    #[error("fixed size mismatch: expected {expected} bytes, found {found}")]
    FixedSizeMismatch {
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        found: usize,
    },

    /// Only Nil, UnlockHash and MultiSignature conditions can be time locked.
    #[error("condition type {0} cannot be wrapped in a time locked condition")]
    InvalidTimeLockedCondition(u8),

    /// Legacy (v0) transactions can only carry single signature
    /// fulfillments.
    #[error("legacy transactions cannot carry fulfillment type {0}")]
    LegacyFulfillment(u8),

    /// A 3Bot transaction lists more entries than one field can hold.
    #[error("too many entries in '{field}': {found} (max {max})")]
    TooManyEntries {
        /// Name of the list.
        field: &'static str,
        /// Number of entries supplied.
        found: usize,
        /// The protocol maximum.
        max: usize,
    },

    /// A 3Bot network address is neither an IP nor a valid hostname.
    #[error("invalid network address '{0}'")]
    InvalidNetworkAddress(String),

    /// A 3Bot name does not follow the naming rules.
    #[error("invalid bot name '{0}'")]
    InvalidBotName(String),

    /// Writing the value with one of the encoders failed.
    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}
