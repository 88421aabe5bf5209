//! Standard value transfers: v1, and the legacy v0 format.
//!
//! A v0 transaction is read into the same in-memory model as v1. It only
//! remembers that it came from v0 so it can keep writing the v0 wire
//! layout and signature hash. Its JSON is always rendered in the v1 shape.

use serde_json::{json, Map, Value};

use super::io::{BlockstakeInput, BlockstakeOutput, CoinInput, CoinOutput};
use super::{
    hash_of, output_id, sia_add_parent_ids, OutputKind, SignatureExtra, TransactionVariant,
};
use crate::config::{TRANSACTION_VERSION_LEGACY, TRANSACTION_VERSION_STANDARD};
use crate::encoding::SiaEncoder;
use crate::types::json::{opt_field, parse_array};
use crate::types::{
    BinaryData, Blockstake, Condition, Currency, Fulfillment, Hash, StrEncoding, TypeError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV1 {
    pub coin_inputs: Vec<CoinInput>,
    pub coin_outputs: Vec<CoinOutput>,
    pub blockstake_inputs: Vec<BlockstakeInput>,
    pub blockstake_outputs: Vec<BlockstakeOutput>,
    pub miner_fees: Vec<Currency>,
    pub arbitrary_data: BinaryData,
    legacy: bool,
}

impl Default for TransactionV1 {
    fn default() -> Self {
        Self {
            coin_inputs: Vec::new(),
            coin_outputs: Vec::new(),
            blockstake_inputs: Vec::new(),
            blockstake_outputs: Vec::new(),
            miner_fees: Vec::new(),
            arbitrary_data: empty_arbitrary_data(),
            legacy: false,
        }
    }
}

fn empty_arbitrary_data() -> BinaryData {
    BinaryData::from_str_encoded("", 0, StrEncoding::Base64).unwrap_or_default()
}

impl TransactionV1 {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when this transaction was read from a v0 document.
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Parse the `data` object of a v1 document.
    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            coin_outputs: parse_array(data, "coinoutputs", CoinOutput::from_json)?,
            blockstake_inputs: parse_array(data, "blockstakeinputs", CoinInput::from_json)?,
            blockstake_outputs: parse_array(data, "blockstakeoutputs", BlockstakeOutput::from_json)?,
            miner_fees: parse_array(data, "minerfees", |v| Currency::from_json(v, "minerfees"))?,
            arbitrary_data: parse_arbitrary_data(data)?,
            legacy: false,
        })
    }

    /// Parse the `data` object of a v0 document into the v1 model.
    pub fn from_legacy_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_legacy_json)?,
            coin_outputs: parse_array(data, "coinoutputs", CoinOutput::from_legacy_json)?,
            blockstake_inputs: parse_array(data, "blockstakeinputs", CoinInput::from_legacy_json)?,
            blockstake_outputs: parse_array(
                data,
                "blockstakeoutputs",
                BlockstakeOutput::from_legacy_json,
            )?,
            miner_fees: parse_array(data, "minerfees", |v| Currency::from_json(v, "minerfees"))?,
            arbitrary_data: parse_arbitrary_data(data)?,
            legacy: true,
        })
    }

    // -- build API --------------------------------------------------------

    pub fn coin_input_add(&mut self, parent_id: Hash, fulfillment: Fulfillment) {
        self.coin_inputs.push(CoinInput::new(parent_id, fulfillment));
    }

    pub fn coin_output_add(&mut self, value: Currency, condition: Condition) {
        self.coin_outputs.push(CoinOutput::new(value, condition));
    }

    pub fn blockstake_input_add(&mut self, parent_id: Hash, fulfillment: Fulfillment) {
        self.blockstake_inputs.push(CoinInput::new(parent_id, fulfillment));
    }

    pub fn blockstake_output_add(&mut self, value: Blockstake, condition: Condition) {
        self.blockstake_outputs.push(BlockstakeOutput::new(value, condition));
    }

    pub fn miner_fee_add(&mut self, fee: Currency) {
        self.miner_fees.push(fee);
    }

    pub fn arbitrary_data_set(&mut self, data: Vec<u8>) -> Result<(), TypeError> {
        self.arbitrary_data = BinaryData::new(data, 0, StrEncoding::Base64)?;
        Ok(())
    }

    // -- encoding ---------------------------------------------------------

    fn sia_fees_and_data(&self, encoder: &mut SiaEncoder) -> Result<(), TypeError> {
        encoder.add_slice(&self.miner_fees)?;
        encoder.add(&self.arbitrary_data)?;
        Ok(())
    }

    fn binary_encode_v1(&self) -> Result<Vec<u8>, TypeError> {
        let mut body = SiaEncoder::new();
        body.add_slice(&self.coin_inputs)?;
        body.add_slice(&self.coin_outputs)?;
        body.add_slice(&self.blockstake_inputs)?;
        body.add_slice(&self.blockstake_outputs)?;
        self.sia_fees_and_data(&mut body)?;

        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_STANDARD);
        encoder.add_bytes(body.data());
        Ok(encoder.into_bytes())
    }

    fn binary_encode_v0(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_LEGACY);
        encoder.add_length(self.coin_inputs.len());
        for input in &self.coin_inputs {
            input.legacy_sia_encode(&mut encoder)?;
        }
        encoder.add_length(self.coin_outputs.len());
        for output in &self.coin_outputs {
            output.legacy_sia_encode(&mut encoder)?;
        }
        encoder.add_length(self.blockstake_inputs.len());
        for input in &self.blockstake_inputs {
            input.legacy_sia_encode(&mut encoder)?;
        }
        encoder.add_length(self.blockstake_outputs.len());
        for output in &self.blockstake_outputs {
            output.legacy_sia_encode(&mut encoder)?;
        }
        self.sia_fees_and_data(&mut encoder)?;
        Ok(encoder.into_bytes())
    }

    fn signature_hash_v1(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_STANDARD);
        encoder.add(&extra)?;
        sia_add_parent_ids(&mut encoder, &self.coin_inputs)?;
        encoder.add_slice(&self.coin_outputs)?;
        sia_add_parent_ids(&mut encoder, &self.blockstake_inputs)?;
        encoder.add_slice(&self.blockstake_outputs)?;
        self.sia_fees_and_data(&mut encoder)?;
        Ok(hash_of(encoder.data()))
    }

    /// The legacy hash commits to the unlock hash of each input's public
    /// key instead of a count + parent ids.
    fn signature_hash_v0(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add(&extra)?;
        for input in &self.coin_inputs {
            let (public_key, _) = input.legacy_public_key()?;
            encoder.add(&input.parent_id)?;
            encoder.add(&public_key.unlockhash())?;
        }
        encoder.add_length(self.coin_outputs.len());
        for output in &self.coin_outputs {
            output.legacy_sia_encode(&mut encoder)?;
        }
        for input in &self.blockstake_inputs {
            let (public_key, _) = input.legacy_public_key()?;
            encoder.add(&input.parent_id)?;
            encoder.add(&public_key.unlockhash())?;
        }
        encoder.add_length(self.blockstake_outputs.len());
        for output in &self.blockstake_outputs {
            output.legacy_sia_encode(&mut encoder)?;
        }
        self.sia_fees_and_data(&mut encoder)?;
        Ok(hash_of(encoder.data()))
    }

    fn output_id(&self, kind: OutputKind, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        let body = if self.legacy {
            binary.get(1..).unwrap_or_default()
        } else {
            &binary[..]
        };
        Ok(output_id(kind, body, index))
    }
}

fn parse_arbitrary_data(data: &Value) -> Result<BinaryData, TypeError> {
    match opt_field(data, "arbitrarydata") {
        Some(value) => BinaryData::from_json(value, 0, StrEncoding::Base64),
        None => Ok(empty_arbitrary_data()),
    }
}

impl TransactionVariant for TransactionV1 {
    fn version(&self) -> u8 {
        if self.legacy {
            TRANSACTION_VERSION_LEGACY
        } else {
            TRANSACTION_VERSION_STANDARD
        }
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        if self.legacy {
            self.binary_encode_v0()
        } else {
            self.binary_encode_v1()
        }
    }

    /// Always the v1 shape, also for legacy transactions. Empty lists and
    /// empty arbitrary data are left out.
    fn json(&self) -> Value {
        let mut data = Map::new();
        if !self.coin_inputs.is_empty() {
            data.insert(
                "coininputs".into(),
                self.coin_inputs.iter().map(CoinInput::json).collect(),
            );
        }
        if !self.coin_outputs.is_empty() {
            data.insert(
                "coinoutputs".into(),
                self.coin_outputs.iter().map(CoinOutput::json).collect(),
            );
        }
        if !self.blockstake_inputs.is_empty() {
            data.insert(
                "blockstakeinputs".into(),
                self.blockstake_inputs.iter().map(CoinInput::json).collect(),
            );
        }
        if !self.blockstake_outputs.is_empty() {
            data.insert(
                "blockstakeoutputs".into(),
                self.blockstake_outputs.iter().map(BlockstakeOutput::json).collect(),
            );
        }
        if !self.miner_fees.is_empty() {
            data.insert(
                "minerfees".into(),
                self.miner_fees.iter().map(Currency::json).collect(),
            );
        }
        if !self.arbitrary_data.is_empty() {
            data.insert("arbitrarydata".into(), self.arbitrary_data.json());
        }
        json!({"version": TRANSACTION_VERSION_STANDARD, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        tracing::trace!(legacy = self.legacy, ?extra, "computing standard signature hash");
        if self.legacy {
            self.signature_hash_v0(extra)
        } else {
            self.signature_hash_v1(extra)
        }
    }

    fn coin_inputs(&self) -> &[CoinInput] {
        &self.coin_inputs
    }

    fn coin_inputs_mut(&mut self) -> &mut [CoinInput] {
        &mut self.coin_inputs
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        self.coin_outputs.clone()
    }

    fn blockstake_inputs(&self) -> &[BlockstakeInput] {
        &self.blockstake_inputs
    }

    fn blockstake_outputs(&self) -> &[BlockstakeOutput] {
        &self.blockstake_outputs
    }

    fn miner_fees(&self) -> Vec<Currency> {
        self.miner_fees.clone()
    }

    fn arbitrary_data(&self) -> &[u8] {
        self.arbitrary_data.value()
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        self.output_id(OutputKind::Coin, index)
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        self.output_id(OutputKind::Blockstake, index)
    }
}
