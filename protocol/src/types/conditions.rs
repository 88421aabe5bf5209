//! # Unlock Conditions
//!
//! A condition says who may spend an output. The family is closed:
//!
//! | tag | condition       | payload                                          |
//! |-----|-----------------|--------------------------------------------------|
//! | 0   | Nil             | nothing (anyone can spend)                       |
//! | 1   | UnlockHash      | 33-byte unlock hash                              |
//! | 2   | AtomicSwap      | sender, receiver, hashed secret, timelock        |
//! | 3   | TimeLocked      | locktime, inner tag, inner payload               |
//! | 4   | MultiSignature  | minimum signature count, unlock hashes           |
//!
//! On the wire every condition is `tag || length || payload`, where the
//! length is a u64 in Sia and a compact prefix in Rivine. A time locked
//! condition embeds its inner condition *without* the inner length.

use serde_json::{json, Value};

use super::error::TypeError;
use super::json::{as_object, field, opt_field, parse_array, u64_field, u64_field_or_zero};
use super::lock::OutputLock;
use super::primitives::Hash;
use super::unlockhash::{UnlockHash, UnlockHashType};
use crate::crypto::{blake2b, MerkleTree};
use crate::encoding::{
    sia_encode, EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder,
};

pub const CONDITION_TYPE_NIL: u8 = 0;
pub const CONDITION_TYPE_UNLOCKHASH: u8 = 1;
pub const CONDITION_TYPE_ATOMIC_SWAP: u8 = 2;
pub const CONDITION_TYPE_TIMELOCK: u8 = 3;
pub const CONDITION_TYPE_MULTI_SIGNATURE: u8 = 4;

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Condition {
    #[default]
    Nil,
    UnlockHash(UnlockHash),
    AtomicSwap(AtomicSwapCondition),
    TimeLocked(TimeLockedCondition),
    MultiSignature(MultiSignatureCondition),
}

impl Condition {
    pub fn type_tag(&self) -> u8 {
        match self {
            Condition::Nil => CONDITION_TYPE_NIL,
            Condition::UnlockHash(_) => CONDITION_TYPE_UNLOCKHASH,
            Condition::AtomicSwap(_) => CONDITION_TYPE_ATOMIC_SWAP,
            Condition::TimeLocked(_) => CONDITION_TYPE_TIMELOCK,
            Condition::MultiSignature(_) => CONDITION_TYPE_MULTI_SIGNATURE,
        }
    }

    /// The address of this condition.
    pub fn unlockhash(&self) -> Result<UnlockHash, TypeError> {
        match self {
            Condition::Nil => Ok(UnlockHash::default()),
            Condition::UnlockHash(uh) => Ok(*uh),
            Condition::AtomicSwap(c) => c.unlockhash(),
            Condition::TimeLocked(c) => c.condition().unlockhash(),
            Condition::MultiSignature(c) => c.unlockhash(),
        }
    }

    /// Same as [`ConditionFactory::from_json`].
    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        ConditionFactory::from_json(value)
    }

    pub fn json(&self) -> Value {
        let data = match self {
            Condition::Nil => return json!({"type": CONDITION_TYPE_NIL}),
            Condition::UnlockHash(uh) => json!({"unlockhash": uh.json()}),
            Condition::AtomicSwap(c) => c.json_data(),
            Condition::TimeLocked(c) => c.json_data(),
            Condition::MultiSignature(c) => c.json_data(),
        };
        json!({"type": self.type_tag(), "data": data})
    }

    fn sia_payload(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        match self {
            Condition::Nil => Ok(()),
            Condition::UnlockHash(uh) => encoder.add(uh),
            Condition::AtomicSwap(c) => c.payload_sia(encoder),
            Condition::TimeLocked(c) => {
                encoder.add_int64(c.lock.value())?;
                encoder.add_byte(c.condition.type_tag());
                c.condition.sia_payload(encoder)
            }
            Condition::MultiSignature(c) => {
                encoder.add_int64(c.min_nr_sig)?;
                encoder.add_slice(&c.unlockhashes)
            }
        }
    }

    fn rivine_payload(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        match self {
            Condition::Nil => Ok(()),
            Condition::UnlockHash(uh) => encoder.add(uh),
            Condition::AtomicSwap(c) => c.payload_rivine(encoder),
            Condition::TimeLocked(c) => {
                encoder.add_int64(c.lock.value())?;
                encoder.add_byte(c.condition.type_tag());
                c.condition.rivine_payload(encoder)
            }
            Condition::MultiSignature(c) => {
                encoder.add_int64(c.min_nr_sig)?;
                encoder.add_slice(&c.unlockhashes)
            }
        }
    }
}

impl From<UnlockHash> for Condition {
    fn from(uh: UnlockHash) -> Self {
        Condition::UnlockHash(uh)
    }
}

impl SiaEncodable for Condition {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        let mut payload = SiaEncoder::new();
        self.sia_payload(&mut payload)?;
        encoder.add_byte(self.type_tag());
        encoder.add_bytes(payload.data());
        Ok(())
    }
}

impl RivineEncodable for Condition {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        let mut payload = RivineEncoder::new();
        self.rivine_payload(&mut payload)?;
        encoder.add_byte(self.type_tag());
        encoder.add_bytes(payload.data())
    }
}

// ---------------------------------------------------------------------------
// AtomicSwap
// ---------------------------------------------------------------------------

/// Coins the receiver can claim with the secret before `time_lock`, and
/// the sender can reclaim after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicSwapCondition {
    pub sender: UnlockHash,
    pub receiver: UnlockHash,
    pub hashed_secret: Hash,
    pub time_lock: OutputLock,
}

impl AtomicSwapCondition {
    /// Type 2 over `H(sia_slice(payload))`.
    pub fn unlockhash(&self) -> Result<UnlockHash, TypeError> {
        let mut payload = SiaEncoder::new();
        self.payload_sia(&mut payload)?;
        let mut encoder = SiaEncoder::new();
        encoder.add_bytes(payload.data());
        Ok(UnlockHash::new(UnlockHashType::AtomicSwap, blake2b(encoder.data()).into()))
    }

    fn payload_sia(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.sender)?;
        encoder.add(&self.receiver)?;
        encoder.add(&self.hashed_secret)?;
        encoder.add_int64(self.time_lock.value())
    }

    fn payload_rivine(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.sender)?;
        encoder.add(&self.receiver)?;
        encoder.add(&self.hashed_secret)?;
        encoder.add_int64(self.time_lock.value())
    }

    fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            sender: UnlockHash::from_json(field(data, "sender")?, "sender")?,
            receiver: UnlockHash::from_json(field(data, "receiver")?, "receiver")?,
            hashed_secret: Hash::from_json(field(data, "hashedsecret")?, "hashedsecret")?,
            time_lock: OutputLock::new(u64_field(data, "timelock")?),
        })
    }

    fn json_data(&self) -> Value {
        json!({
            "sender": self.sender.json(),
            "receiver": self.receiver.json(),
            "hashedsecret": self.hashed_secret.json(),
            "timelock": self.time_lock.json(),
        })
    }
}

// ---------------------------------------------------------------------------
// TimeLocked
// ---------------------------------------------------------------------------

/// Wraps a Nil, UnlockHash or MultiSignature condition, which only becomes
/// spendable once the lock (height or timestamp) has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLockedCondition {
    lock: OutputLock,
    condition: Box<Condition>,
}

impl TimeLockedCondition {
    pub fn new(lock: OutputLock, condition: Condition) -> Result<Self, TypeError> {
        match condition {
            Condition::Nil | Condition::UnlockHash(_) | Condition::MultiSignature(_) => Ok(Self {
                lock,
                condition: Box::new(condition),
            }),
            other => Err(TypeError::InvalidTimeLockedCondition(other.type_tag())),
        }
    }

    pub fn lock(&self) -> OutputLock {
        self.lock
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        let lock = OutputLock::from_json(field(data, "locktime")?, "locktime")?;
        let inner = opt_field(data, "condition").map_or(Ok(Condition::Nil), ConditionFactory::from_json)?;
        Self::new(lock, inner)
    }

    fn json_data(&self) -> Value {
        json!({
            "locktime": self.lock.json(),
            "condition": self.condition.json(),
        })
    }
}

// ---------------------------------------------------------------------------
// MultiSignature
// ---------------------------------------------------------------------------

/// Spendable by any `min_nr_sig` of the listed unlock hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSignatureCondition {
    pub unlockhashes: Vec<UnlockHash>,
    pub min_nr_sig: u64,
}

impl MultiSignatureCondition {
    pub fn new(unlockhashes: Vec<UnlockHash>, min_nr_sig: u64) -> Self {
        Self {
            unlockhashes,
            min_nr_sig,
        }
    }

    /// Type 3 over the Merkle root of `[n, sorted unlock hashes..., min_nr_sig]`.
    ///
    /// The unlock hashes are sorted first, so the address does not depend
    /// on the order the signers were listed in.
    pub fn unlockhash(&self) -> Result<UnlockHash, TypeError> {
        let mut sorted = self.unlockhashes.clone();
        sorted.sort();

        let mut tree = MerkleTree::new();
        tree.push(&sia_encode(&(sorted.len() as u64))?);
        for uh in &sorted {
            tree.push(&uh.to_bytes());
        }
        tree.push(&sia_encode(&self.min_nr_sig)?);
        Ok(UnlockHash::new(UnlockHashType::MultiSig, tree.root().into()))
    }

    fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            unlockhashes: parse_array(data, "unlockhashes", |v| UnlockHash::from_json(v, "unlockhashes"))?,
            min_nr_sig: u64_field_or_zero(data, "minimumsignaturecount")?,
        })
    }

    fn json_data(&self) -> Value {
        let uhs: Vec<Value> = self.unlockhashes.iter().map(UnlockHash::json).collect();
        json!({
            "unlockhashes": uhs,
            "minimumsignaturecount": self.min_nr_sig,
        })
    }
}

// ---------------------------------------------------------------------------
// ConditionFactory
// ---------------------------------------------------------------------------

/// Builds conditions from their JSON form or from their parts.
pub struct ConditionFactory;

impl ConditionFactory {
    /// Dispatches on `type`. A `null` condition or a missing `type` means
    /// Nil, and so do a missing, `null` or `{}` `data` for type 0.
    pub fn from_json(value: &Value) -> Result<Condition, TypeError> {
        if value.is_null() {
            return Ok(Condition::Nil);
        }
        as_object(value, "condition")?;
        let tag = u64_field_or_zero(value, "type")?;
        tracing::trace!(condition_type = tag, "parsing condition");

        let data = opt_field(value, "data");
        let require_data = || data.ok_or_else(|| TypeError::MissingField("data".to_string()));
        match tag {
            t if t == CONDITION_TYPE_NIL as u64 => Ok(Condition::Nil),
            t if t == CONDITION_TYPE_UNLOCKHASH as u64 => {
                let data = require_data()?;
                Ok(Condition::UnlockHash(UnlockHash::from_json(
                    field(data, "unlockhash")?,
                    "unlockhash",
                )?))
            }
            t if t == CONDITION_TYPE_ATOMIC_SWAP as u64 => Ok(Condition::AtomicSwap(
                AtomicSwapCondition::from_json_data(require_data()?)?,
            )),
            t if t == CONDITION_TYPE_TIMELOCK as u64 => Ok(Condition::TimeLocked(
                TimeLockedCondition::from_json_data(require_data()?)?,
            )),
            t if t == CONDITION_TYPE_MULTI_SIGNATURE as u64 => Ok(Condition::MultiSignature(
                MultiSignatureCondition::from_json_data(require_data()?)?,
            )),
            other => Err(TypeError::UnknownConditionType(other)),
        }
    }

    pub fn nil_new() -> Condition {
        Condition::Nil
    }

    pub fn unlockhash_new(unlockhash: UnlockHash) -> Condition {
        Condition::UnlockHash(unlockhash)
    }

    pub fn atomic_swap_new(
        sender: UnlockHash,
        receiver: UnlockHash,
        hashed_secret: Hash,
        time_lock: OutputLock,
    ) -> Condition {
        Condition::AtomicSwap(AtomicSwapCondition {
            sender,
            receiver,
            hashed_secret,
            time_lock,
        })
    }

    pub fn multi_signature_new(unlockhashes: Vec<UnlockHash>, min_nr_sig: u64) -> Condition {
        Condition::MultiSignature(MultiSignatureCondition::new(unlockhashes, min_nr_sig))
    }

    pub fn locktime_new(lock: OutputLock, condition: Condition) -> Result<Condition, TypeError> {
        TimeLockedCondition::new(lock, condition).map(Condition::TimeLocked)
    }

    /// The condition for sending to `recipient`: an unlock hash string, or
    /// the empty string for a Nil condition. A non-zero `lock` wraps the
    /// result in a time lock.
    pub fn from_recipient(recipient: &str, lock: OutputLock) -> Result<Condition, TypeError> {
        let condition = if recipient.is_empty() {
            Condition::Nil
        } else {
            Condition::UnlockHash(recipient.parse()?)
        };
        if lock.value() == 0 {
            return Ok(condition);
        }
        Self::locktime_new(lock, condition)
    }
}
