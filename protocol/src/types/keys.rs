//! # Public Keys and Signatures
//!
//! TFChain only knows one signature algorithm, Ed25519, plus a "nil" key
//! used as a placeholder. A [`PublicKey`] has three shapes:
//!
//! - string / JSON: `"ed25519:<64 hex>"` (the nil key is `":<64 hex>"`);
//! - Sia: `spec16("ed25519") || u64(32) || key`;
//! - Rivine: `algo byte (0 nil, 1 ed25519) || key`.
//!
//! Keys are parsed and hashed here. Verification is offered as a
//! convenience through `ed25519-dalek`; signing stays with the wallet.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};
use serde_json::Value;

use super::error::TypeError;
use super::json::{as_str, impl_string_serde};
use super::unlockhash::{UnlockHash, UnlockHashType};
use crate::config::{ED25519_PUBLIC_KEY_SIZE, SPECIFIER_ED25519};
use crate::crypto::blake2b;
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};

/// The algorithm a [`PublicKey`] belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PublicKeySpecifier {
    Nil,
    #[default]
    Ed25519,
}

impl PublicKeySpecifier {
    /// The name used in string forms (empty for nil).
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicKeySpecifier::Nil => "",
            PublicKeySpecifier::Ed25519 => "ed25519",
        }
    }

    /// The 16-byte Sia specifier.
    pub fn sia_specifier(&self) -> [u8; 16] {
        match self {
            PublicKeySpecifier::Nil => [0u8; 16],
            PublicKeySpecifier::Ed25519 => SPECIFIER_ED25519,
        }
    }

    /// The single byte used by the Rivine encoding.
    pub fn rivine_byte(&self) -> u8 {
        match self {
            PublicKeySpecifier::Nil => 0,
            PublicKeySpecifier::Ed25519 => 1,
        }
    }
}

impl FromStr for PublicKeySpecifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Ok(PublicKeySpecifier::Nil),
            "ed25519" => Ok(PublicKeySpecifier::Ed25519),
            _ => Err(TypeError::UnknownPublicKeySpecifier(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PublicKey {
    specifier: PublicKeySpecifier,
    key: [u8; ED25519_PUBLIC_KEY_SIZE],
}

impl PublicKey {
    pub fn new(specifier: PublicKeySpecifier, key: [u8; ED25519_PUBLIC_KEY_SIZE]) -> Self {
        Self { specifier, key }
    }

    pub fn ed25519(key: [u8; ED25519_PUBLIC_KEY_SIZE]) -> Self {
        Self::new(PublicKeySpecifier::Ed25519, key)
    }

    pub fn specifier(&self) -> PublicKeySpecifier {
        self.specifier
    }

    pub fn key(&self) -> &[u8; ED25519_PUBLIC_KEY_SIZE] {
        &self.key
    }

    /// The public-key unlock hash: type 1 over `H(sia_slice(sia(key)))`.
    pub fn unlockhash(&self) -> UnlockHash {
        let mut encoder = SiaEncoder::new();
        encoder.add_bytes(&self.sia_bytes());
        UnlockHash::new(UnlockHashType::PublicKey, blake2b(encoder.data()).into())
    }

    /// The Sia form of the key, without any outer length prefix.
    pub fn sia_bytes(&self) -> Vec<u8> {
        let mut encoder = SiaEncoder::new();
        encoder.add_raw_bytes(&self.specifier.sia_specifier());
        encoder.add_bytes(&self.key);
        encoder.into_bytes()
    }

    /// Check an Ed25519 signature over `message`. Nil keys never verify.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if self.specifier != PublicKeySpecifier::Ed25519 {
            return false;
        }
        let Ok(key) = VerifyingKey::from_bytes(&self.key) else {
            return false;
        };
        let Ok(sig) = DalekSignature::from_slice(signature.as_bytes()) else {
            return false;
        };
        key.verify(message, &sig).is_ok()
    }

    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        as_str(value, field)?.parse()
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(key: &VerifyingKey) -> Self {
        Self::ed25519(key.to_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.specifier.as_str(), hex::encode(self.key))
    }
}

impl FromStr for PublicKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algo, key_hex) = s
            .split_once(':')
            .ok_or_else(|| TypeError::InvalidPublicKey(s.to_string()))?;
        let specifier: PublicKeySpecifier = algo.parse()?;
        let key = hex::decode(key_hex)?
            .try_into()
            .map_err(|_| TypeError::InvalidPublicKey(s.to_string()))?;
        Ok(Self { specifier, key })
    }
}

impl SiaEncodable for PublicKey {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_raw_bytes(&self.sia_bytes());
        Ok(())
    }
}

impl RivineEncodable for PublicKey {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_byte(self.specifier.rivine_byte());
        encoder.add_raw_bytes(&self.key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A raw signature, printed as hex. Usually 64 bytes, but unsigned
/// transactions carry an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absent, `null` and `""` all give the empty signature.
    pub fn from_json(value: Option<&Value>, field: &str) -> Result<Self, TypeError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v) => as_str(v, field)?.parse(),
        }
    }

    pub fn json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl From<&DalekSignature> for Signature {
    fn from(sig: &DalekSignature) -> Self {
        Self(sig.to_bytes().to_vec())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl FromStr for Signature {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(hex::decode(s)?))
    }
}

/// Signatures inside fulfillments are slices in both dialects.
impl SiaEncodable for Signature {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&self.0);
        Ok(())
    }
}

impl RivineEncodable for Signature {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add_bytes(&self.0)
    }
}

impl_string_serde!(PublicKey, Signature);
