//! # Fulfillments
//!
//! A fulfillment is the proof half of a spend: it carries the public
//! key(s) and signature(s) that satisfy the parent output's condition.
//!
//! | tag | fulfillment     | fulfills                                   |
//! |-----|-----------------|--------------------------------------------|
//! | 1   | SingleSignature | an UnlockHash condition                    |
//! | 2   | AtomicSwap      | an AtomicSwap condition (secret optional)  |
//! | 3   | MultiSignature  | a MultiSignature condition, given enough pairs |
//!
//! Wire layout mirrors conditions: `tag || length || payload`.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Map, Value};

use super::conditions::Condition;
use super::error::TypeError;
use super::json::{as_object, field, opt_field, opt_str_field, parse_array, u64_field};
use super::keys::{PublicKey, Signature};
use crate::config::ATOMIC_SWAP_SECRET_SIZE;
use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};

pub const FULFILLMENT_TYPE_SINGLE_SIGNATURE: u8 = 1;
pub const FULFILLMENT_TYPE_ATOMIC_SWAP: u8 = 2;
pub const FULFILLMENT_TYPE_MULTI_SIGNATURE: u8 = 3;

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// The 32-byte preimage revealed to claim an atomic swap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AtomicSwapSecret([u8; ATOMIC_SWAP_SECRET_SIZE]);

impl AtomicSwapSecret {
    pub fn new(bytes: [u8; ATOMIC_SWAP_SECRET_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ATOMIC_SWAP_SECRET_SIZE] {
        &self.0
    }
}

impl fmt::Display for AtomicSwapSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for AtomicSwapSecret {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let found = bytes.len();
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| TypeError::FixedSizeMismatch {
                expected: ATOMIC_SWAP_SECRET_SIZE,
                found,
            })
    }
}

/// One signer of a multisig fulfillment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicKeySignaturePair {
    pub public_key: PublicKey,
    pub signature: Signature,
}

impl PublicKeySignaturePair {
    pub fn new(public_key: PublicKey, signature: Signature) -> Self {
        Self {
            public_key,
            signature,
        }
    }

    fn from_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            public_key: PublicKey::from_json(field(value, "publickey")?, "publickey")?,
            signature: Signature::from_json(value.get("signature"), "signature")?,
        })
    }

    fn json(&self) -> Value {
        json!({
            "publickey": self.public_key.json(),
            "signature": self.signature.json(),
        })
    }
}

impl SiaEncodable for PublicKeySignaturePair {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.public_key)?;
        encoder.add(&self.signature)
    }
}

impl RivineEncodable for PublicKeySignaturePair {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.public_key)?;
        encoder.add(&self.signature)
    }
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleSignatureFulfillment {
    pub public_key: PublicKey,
    pub signature: Signature,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicSwapFulfillment {
    pub public_key: PublicKey,
    pub signature: Signature,
    /// Present when the receiver claims; absent when the sender refunds.
    pub secret: Option<AtomicSwapSecret>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSignatureFulfillment {
    pub pairs: Vec<PublicKeySignaturePair>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfillment {
    SingleSignature(SingleSignatureFulfillment),
    AtomicSwap(AtomicSwapFulfillment),
    MultiSignature(MultiSignatureFulfillment),
}

impl Default for Fulfillment {
    fn default() -> Self {
        Fulfillment::SingleSignature(SingleSignatureFulfillment::default())
    }
}

impl Fulfillment {
    pub fn type_tag(&self) -> u8 {
        match self {
            Fulfillment::SingleSignature(_) => FULFILLMENT_TYPE_SINGLE_SIGNATURE,
            Fulfillment::AtomicSwap(_) => FULFILLMENT_TYPE_ATOMIC_SWAP,
            Fulfillment::MultiSignature(_) => FULFILLMENT_TYPE_MULTI_SIGNATURE,
        }
    }

    /// Structural check: is this the right kind of proof for `condition`?
    ///
    /// Signatures are not verified here; this only checks that the shapes
    /// line up (and, for multisig, that enough pairs are present). Time
    /// locked conditions are judged by their inner condition.
    pub fn is_fulfilled(&self, condition: &Condition) -> bool {
        match (self, condition) {
            (_, Condition::TimeLocked(locked)) => self.is_fulfilled(locked.condition()),
            (Fulfillment::SingleSignature(_), Condition::UnlockHash(_)) => true,
            (Fulfillment::AtomicSwap(_), Condition::AtomicSwap(_)) => true,
            (Fulfillment::MultiSignature(f), Condition::MultiSignature(c)) => {
                f.pairs.len() as u64 >= c.min_nr_sig
            }
            _ => false,
        }
    }

    /// Same as [`FulfillmentFactory::from_json`].
    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        FulfillmentFactory::from_json(value)
    }

    pub fn json(&self) -> Value {
        let data = match self {
            Fulfillment::SingleSignature(f) => json!({
                "publickey": f.public_key.json(),
                "signature": f.signature.json(),
            }),
            Fulfillment::AtomicSwap(f) => {
                let mut data = Map::new();
                data.insert("publickey".into(), f.public_key.json());
                data.insert("signature".into(), f.signature.json());
                if let Some(secret) = &f.secret {
                    data.insert("secret".into(), Value::String(secret.to_string()));
                }
                Value::Object(data)
            }
            Fulfillment::MultiSignature(f) => {
                let pairs: Vec<Value> = f.pairs.iter().map(PublicKeySignaturePair::json).collect();
                json!({"pairs": pairs})
            }
        };
        json!({"type": self.type_tag(), "data": data})
    }

    fn sia_payload(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        match self {
            Fulfillment::SingleSignature(f) => {
                encoder.add(&f.public_key)?;
                encoder.add(&f.signature)
            }
            Fulfillment::AtomicSwap(f) => {
                encoder.add(&f.public_key)?;
                encoder.add(&f.signature)?;
                if let Some(secret) = &f.secret {
                    encoder.add_raw_bytes(secret.as_bytes());
                }
                Ok(())
            }
            Fulfillment::MultiSignature(f) => encoder.add_slice(&f.pairs),
        }
    }

    fn rivine_payload(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        match self {
            Fulfillment::SingleSignature(f) => {
                encoder.add(&f.public_key)?;
                encoder.add(&f.signature)
            }
            Fulfillment::AtomicSwap(f) => {
                encoder.add(&f.public_key)?;
                encoder.add(&f.signature)?;
                if let Some(secret) = &f.secret {
                    encoder.add_raw_bytes(secret.as_bytes());
                }
                Ok(())
            }
            Fulfillment::MultiSignature(f) => encoder.add_slice(&f.pairs),
        }
    }
}

impl SiaEncodable for Fulfillment {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        let mut payload = SiaEncoder::new();
        self.sia_payload(&mut payload)?;
        encoder.add_byte(self.type_tag());
        encoder.add_bytes(payload.data());
        Ok(())
    }
}

impl RivineEncodable for Fulfillment {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        let mut payload = RivineEncoder::new();
        self.rivine_payload(&mut payload)?;
        encoder.add_byte(self.type_tag());
        encoder.add_bytes(payload.data())
    }
}

// ---------------------------------------------------------------------------
// FulfillmentFactory
// ---------------------------------------------------------------------------

/// Builds fulfillments from JSON or from their parts.
pub struct FulfillmentFactory;

impl FulfillmentFactory {
    /// Dispatches on `type`. Unlike conditions there is no default type.
    pub fn from_json(value: &Value) -> Result<Fulfillment, TypeError> {
        as_object(value, "fulfillment")?;
        let tag = u64_field(value, "type")?;
        tracing::trace!(fulfillment_type = tag, "parsing fulfillment");

        let data = opt_field(value, "data").unwrap_or(&Value::Null);
        match tag {
            t if t == FULFILLMENT_TYPE_SINGLE_SIGNATURE as u64 => {
                Ok(Fulfillment::SingleSignature(SingleSignatureFulfillment {
                    public_key: PublicKey::from_json(field(data, "publickey")?, "publickey")?,
                    signature: Signature::from_json(data.get("signature"), "signature")?,
                }))
            }
            t if t == FULFILLMENT_TYPE_ATOMIC_SWAP as u64 => {
                Ok(Fulfillment::AtomicSwap(AtomicSwapFulfillment {
                    public_key: PublicKey::from_json(field(data, "publickey")?, "publickey")?,
                    signature: Signature::from_json(data.get("signature"), "signature")?,
                    secret: opt_str_field(data, "secret")?.map(str::parse).transpose()?,
                }))
            }
            t if t == FULFILLMENT_TYPE_MULTI_SIGNATURE as u64 => {
                Ok(Fulfillment::MultiSignature(MultiSignatureFulfillment {
                    pairs: parse_array(data, "pairs", PublicKeySignaturePair::from_json)?,
                }))
            }
            other => Err(TypeError::UnknownFulfillmentType(other)),
        }
    }

    pub fn single_signature_new(public_key: PublicKey, signature: Signature) -> Fulfillment {
        Fulfillment::SingleSignature(SingleSignatureFulfillment {
            public_key,
            signature,
        })
    }

    pub fn atomic_swap_new(
        public_key: PublicKey,
        signature: Signature,
        secret: Option<AtomicSwapSecret>,
    ) -> Fulfillment {
        Fulfillment::AtomicSwap(AtomicSwapFulfillment {
            public_key,
            signature,
            secret,
        })
    }

    pub fn multi_signature_new(pairs: Vec<PublicKeySignaturePair>) -> Fulfillment {
        Fulfillment::MultiSignature(MultiSignatureFulfillment { pairs })
    }
}
