//! Transaction inputs and outputs.
//!
//! An input references the id of an unspent output and carries the
//! fulfillment that satisfies that output's condition. An output pairs a
//! value with the condition guarding it. Coin and block stake inputs share
//! one shape; their outputs differ only in the value type.
//!
//! The legacy (v0) wire format predates conditions and fulfillments: an
//! input is a public key + signature and an output is a bare unlock hash.
//! The `legacy_*` helpers read and write that shape.

use serde_json::{json, Value};

use crate::encoding::{EncodingError, RivineEncodable, RivineEncoder, SiaEncodable, SiaEncoder};
use crate::types::json::{field, opt_field};
use crate::types::{
    Blockstake, Condition, ConditionFactory, Currency, Fulfillment, FulfillmentFactory, Hash,
    PublicKey, Signature, TypeError, UnlockHash,
};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Spends the output identified by `parent_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinInput {
    pub parent_id: Hash,
    pub fulfillment: Fulfillment,
}

/// Block stake inputs look exactly like coin inputs.
pub type BlockstakeInput = CoinInput;

impl CoinInput {
    pub fn new(parent_id: Hash, fulfillment: Fulfillment) -> Self {
        Self {
            parent_id,
            fulfillment,
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            parent_id: Hash::from_json(field(value, "parentid")?, "parentid")?,
            fulfillment: FulfillmentFactory::from_json(field(value, "fulfillment")?)?,
        })
    }

    /// Reads `{"parentid", "unlocker": {"type": 1, "condition": {"publickey"},
    /// "fulfillment": {"signature"}}}`.
    pub fn from_legacy_json(value: &Value) -> Result<Self, TypeError> {
        let unlocker = field(value, "unlocker")?;
        let condition = field(unlocker, "condition")?;
        let public_key = PublicKey::from_json(field(condition, "publickey")?, "publickey")?;
        let signature = Signature::from_json(
            opt_field(unlocker, "fulfillment").and_then(|f| f.get("signature")),
            "signature",
        )?;
        Ok(Self {
            parent_id: Hash::from_json(field(value, "parentid")?, "parentid")?,
            fulfillment: FulfillmentFactory::single_signature_new(public_key, signature),
        })
    }

    pub fn json(&self) -> Value {
        json!({
            "parentid": self.parent_id.json(),
            "fulfillment": self.fulfillment.json(),
        })
    }

    /// The public key of a legacy input. Only single signature
    /// fulfillments have a legacy form.
    pub(crate) fn legacy_public_key(&self) -> Result<(&PublicKey, &Signature), TypeError> {
        match &self.fulfillment {
            Fulfillment::SingleSignature(f) => Ok((&f.public_key, &f.signature)),
            other => Err(TypeError::LegacyFulfillment(other.type_tag())),
        }
    }

    /// `parentid || 0x01 || u64(len) || sia(pubkey) || sia(signature)`.
    pub(crate) fn legacy_sia_encode(&self, encoder: &mut SiaEncoder) -> Result<(), TypeError> {
        let (public_key, signature) = self.legacy_public_key()?;
        encoder.add(&self.parent_id)?;
        encoder.add_byte(1);
        encoder.add_bytes(&public_key.sia_bytes());
        encoder.add(signature)?;
        Ok(())
    }
}

impl SiaEncodable for CoinInput {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.parent_id)?;
        encoder.add(&self.fulfillment)
    }
}

impl RivineEncodable for CoinInput {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.parent_id)?;
        encoder.add(&self.fulfillment)
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinOutput {
    pub value: Currency,
    pub condition: Condition,
}

impl CoinOutput {
    pub fn new(value: Currency, condition: Condition) -> Self {
        Self { value, condition }
    }

    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            value: Currency::from_json(field(value, "value")?, "value")?,
            condition: opt_field(value, "condition").map_or(Ok(Condition::Nil), ConditionFactory::from_json)?,
        })
    }

    /// Reads `{"value", "unlockhash"}`.
    pub fn from_legacy_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            value: Currency::from_json(field(value, "value")?, "value")?,
            condition: UnlockHash::from_json(field(value, "unlockhash")?, "unlockhash")?.into(),
        })
    }

    pub fn json(&self) -> Value {
        json!({
            "value": self.value.json(),
            "condition": self.condition.json(),
        })
    }

    /// `sia(value) || uh33`.
    pub(crate) fn legacy_sia_encode(&self, encoder: &mut SiaEncoder) -> Result<(), TypeError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition.unlockhash()?)?;
        Ok(())
    }
}

impl SiaEncodable for CoinOutput {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition)
    }
}

impl RivineEncodable for CoinOutput {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockstakeOutput {
    pub value: Blockstake,
    pub condition: Condition,
}

impl BlockstakeOutput {
    pub fn new(value: Blockstake, condition: Condition) -> Self {
        Self { value, condition }
    }

    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            value: Blockstake::from_json(field(value, "value")?, "value")?,
            condition: opt_field(value, "condition").map_or(Ok(Condition::Nil), ConditionFactory::from_json)?,
        })
    }

    pub fn from_legacy_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            value: Blockstake::from_json(field(value, "value")?, "value")?,
            condition: UnlockHash::from_json(field(value, "unlockhash")?, "unlockhash")?.into(),
        })
    }

    pub fn json(&self) -> Value {
        json!({
            "value": self.value.json(),
            "condition": self.condition.json(),
        })
    }

    pub(crate) fn legacy_sia_encode(&self, encoder: &mut SiaEncoder) -> Result<(), TypeError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition.unlockhash()?)?;
        Ok(())
    }
}

impl SiaEncodable for BlockstakeOutput {
    fn sia_binary_encode(&self, encoder: &mut SiaEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition)
    }
}

impl RivineEncodable for BlockstakeOutput {
    fn rivine_binary_encode(&self, encoder: &mut RivineEncoder) -> Result<(), EncodingError> {
        encoder.add(&self.value)?;
        encoder.add(&self.condition)
    }
}
