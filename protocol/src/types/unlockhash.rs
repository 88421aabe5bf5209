//! # Unlock Hashes
//!
//! An unlock hash is the address form of a condition: a type byte plus a
//! 32-byte hash. Its string form appends a 6-byte checksum so typos get
//! caught before coins go somewhere nobody can spend them:
//!
//! ```text
//! hex(type) || hex(hash) || hex(H(type || hash)[..6])      (78 chars)
//! ```
//!
//! The nil unlock hash is the exception: it prints as 78 zeros, checksum
//! included.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::error::TypeError;
use super::json::{as_str, impl_string_serde};
use super::primitives::Hash;
use crate::config::{HASH_SIZE, UNLOCKHASH_CHECKSUM_SIZE};
use crate::crypto::blake2b_multi;
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};

/// Length of the string form, in hex characters.
pub const UNLOCKHASH_STRING_LENGTH: usize = (1 + HASH_SIZE + UNLOCKHASH_CHECKSUM_SIZE) * 2;

/// Binary size: type byte + hash.
pub const UNLOCKHASH_SIZE: usize = 1 + HASH_SIZE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum UnlockHashType {
    #[default]
    Nil = 0,
    PublicKey = 1,
    AtomicSwap = 2,
    MultiSig = 3,
}

impl TryFrom<u8> for UnlockHashType {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UnlockHashType::Nil),
            1 => Ok(UnlockHashType::PublicKey),
            2 => Ok(UnlockHashType::AtomicSwap),
            3 => Ok(UnlockHashType::MultiSig),
            other => Err(TypeError::UnknownUnlockHashType(other)),
        }
    }
}

/// Field order matters: deriving `Ord` on (type, hash) sorts unlock hashes
/// exactly like their string forms do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnlockHash {
    uh_type: UnlockHashType,
    hash: Hash,
}

impl UnlockHash {
    pub fn new(uh_type: UnlockHashType, hash: Hash) -> Self {
        Self { uh_type, hash }
    }

    pub fn uh_type(&self) -> UnlockHashType {
        self.uh_type
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn is_nil(&self) -> bool {
        self.uh_type == UnlockHashType::Nil && self.hash.is_nil()
    }

    /// The 33 bytes that go on the wire: type byte followed by the hash.
    pub fn to_bytes(&self) -> [u8; UNLOCKHASH_SIZE] {
        let mut out = [0u8; UNLOCKHASH_SIZE];
        out[0] = self.uh_type as u8;
        out[1..].copy_from_slice(self.hash.as_bytes());
        out
    }

    /// First 6 bytes of `H(type || hash)`; all zeros for the nil hash.
    pub fn checksum(&self) -> [u8; UNLOCKHASH_CHECKSUM_SIZE] {
        let mut out = [0u8; UNLOCKHASH_CHECKSUM_SIZE];
        if !self.is_nil() {
            let digest = blake2b_multi(&[&[self.uh_type as u8], self.hash.as_bytes()]);
            out.copy_from_slice(&digest[..UNLOCKHASH_CHECKSUM_SIZE]);
        }
        out
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        as_str(value, field)?.parse()
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl TryFrom<&[u8]> for UnlockHash {
    type Error = TypeError;

    /// Builds an unlock hash from its 33-byte binary form.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != UNLOCKHASH_SIZE {
            return Err(TypeError::FixedSizeMismatch {
                expected: UNLOCKHASH_SIZE,
                found: bytes.len(),
            });
        }
        Ok(Self {
            uh_type: UnlockHashType::try_from(bytes[0])?,
            hash: Hash::try_from(&bytes[1..])?,
        })
    }
}

impl fmt::Display for UnlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            hex::encode(self.to_bytes()),
            hex::encode(self.checksum())
        )
    }
}

impl FromStr for UnlockHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != UNLOCKHASH_STRING_LENGTH {
            return Err(TypeError::InvalidUnlockHash(s.to_string()));
        }
        let bytes = hex::decode(s)?;
        let uh = Self::try_from(&bytes[..UNLOCKHASH_SIZE])?;
        let found = &bytes[UNLOCKHASH_SIZE..];
        let expected = uh.checksum();
        if found != expected.as_slice() {
            return Err(TypeError::UnlockHashChecksumMismatch {
                expected: hex::encode(expected),
                found: hex::encode(found),
            });
        }
        Ok(uh)
    }
}

impl SiaEncodable for UnlockHash {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.to_bytes());
        Ok(())
    }
}

impl RivineEncodable for UnlockHash {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.to_bytes());
        Ok(())
    }
}

impl_string_serde!(UnlockHash);
