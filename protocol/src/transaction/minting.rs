//! Minting transactions.
//!
//! - **v128** hands minting power to a new mint condition.
//! - **v129** creates new coins out of thin air.
//!
//! Both are authorized by a single fulfillment of the current mint
//! condition and carry a random 8-byte nonce so two otherwise identical
//! transactions never share an id.

use serde_json::{json, Map, Value};

use super::io::CoinOutput;
use super::{extension_output_id, hash_of, OutputKind, SignatureExtra, TransactionVariant};
use crate::config::{
    MINTING_NONCE_SIZE, SPECIFIER_COIN_CREATION_TX, SPECIFIER_MINTER_DEFINITION_TX,
    TRANSACTION_VERSION_COIN_CREATION, TRANSACTION_VERSION_MINTER_DEFINITION,
};
use crate::encoding::SiaEncoder;
use crate::types::json::{field, opt_field, parse_array};
use crate::types::{
    BinaryData, Condition, ConditionFactory, Currency, Fulfillment, FulfillmentFactory, Hash,
    StrEncoding, TypeError,
};

fn random_nonce() -> BinaryData {
    let nonce: [u8; MINTING_NONCE_SIZE] = rand::random();
    BinaryData::new(nonce.to_vec(), MINTING_NONCE_SIZE, StrEncoding::Base64).unwrap_or_default()
}

fn parse_nonce(data: &Value) -> Result<BinaryData, TypeError> {
    match opt_field(data, "nonce") {
        Some(value) => BinaryData::from_json(value, MINTING_NONCE_SIZE, StrEncoding::Base64),
        None => Ok(random_nonce()),
    }
}

fn parse_arbitrary_data(data: &Value) -> Result<BinaryData, TypeError> {
    match opt_field(data, "arbitrarydata") {
        Some(value) => BinaryData::from_json(value, 0, StrEncoding::Base64),
        None => Ok(empty_arbitrary_data()),
    }
}

fn empty_arbitrary_data() -> BinaryData {
    BinaryData::new(Vec::new(), 0, StrEncoding::Base64).unwrap_or_default()
}

fn insert_fees_and_data(data: &mut Map<String, Value>, fees: &[Currency], arbitrary: &BinaryData) {
    data.insert("minerfees".into(), fees.iter().map(Currency::json).collect());
    if !arbitrary.is_empty() {
        data.insert("arbitrarydata".into(), arbitrary.json());
    }
}

// ---------------------------------------------------------------------------
// v128: minter definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV128 {
    pub nonce: BinaryData,
    pub mint_fulfillment: Fulfillment,
    pub mint_condition: Condition,
    pub miner_fees: Vec<Currency>,
    pub arbitrary_data: BinaryData,
}

impl Default for TransactionV128 {
    fn default() -> Self {
        Self {
            nonce: random_nonce(),
            mint_fulfillment: Fulfillment::default(),
            mint_condition: Condition::default(),
            miner_fees: Vec::new(),
            arbitrary_data: empty_arbitrary_data(),
        }
    }
}

impl TransactionV128 {
    /// An empty minter definition with a fresh random nonce.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            nonce: parse_nonce(data)?,
            mint_fulfillment: FulfillmentFactory::from_json(field(data, "mintfulfillment")?)?,
            mint_condition: ConditionFactory::from_json(
                opt_field(data, "mintcondition").unwrap_or(&Value::Null),
            )?,
            miner_fees: parse_array(data, "minerfees", |v| Currency::from_json(v, "minerfees"))?,
            arbitrary_data: parse_arbitrary_data(data)?,
        })
    }
}

impl TransactionVariant for TransactionV128 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_MINTER_DEFINITION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_MINTER_DEFINITION);
        encoder.add(&self.nonce)?;
        encoder.add(&self.mint_fulfillment)?;
        encoder.add(&self.mint_condition)?;
        encoder.add_slice(&self.miner_fees)?;
        encoder.add(&self.arbitrary_data)?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("nonce".into(), self.nonce.json());
        data.insert("mintfulfillment".into(), self.mint_fulfillment.json());
        data.insert("mintcondition".into(), self.mint_condition.json());
        insert_fees_and_data(&mut data, &self.miner_fees, &self.arbitrary_data);
        json!({"version": TRANSACTION_VERSION_MINTER_DEFINITION, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_MINTER_DEFINITION);
        encoder.add_raw_bytes(&SPECIFIER_MINTER_DEFINITION_TX);
        encoder.add(&self.nonce)?;
        encoder.add(&extra)?;
        encoder.add(&self.mint_condition)?;
        encoder.add_slice(&self.miner_fees)?;
        encoder.add(&self.arbitrary_data)?;
        Ok(hash_of(encoder.data()))
    }

    fn miner_fees(&self) -> Vec<Currency> {
        self.miner_fees.clone()
    }

    fn arbitrary_data(&self) -> &[u8] {
        self.arbitrary_data.value()
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_MINTER_DEFINITION_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_MINTER_DEFINITION_TX,
            &binary,
            index,
        ))
    }
}

// ---------------------------------------------------------------------------
// v129: coin creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV129 {
    pub nonce: BinaryData,
    pub mint_fulfillment: Fulfillment,
    pub coin_outputs: Vec<CoinOutput>,
    pub miner_fees: Vec<Currency>,
    pub arbitrary_data: BinaryData,
}

impl Default for TransactionV129 {
    fn default() -> Self {
        Self {
            nonce: random_nonce(),
            mint_fulfillment: Fulfillment::default(),
            coin_outputs: Vec::new(),
            miner_fees: Vec::new(),
            arbitrary_data: empty_arbitrary_data(),
        }
    }
}

impl TransactionV129 {
    /// An empty coin creation with a fresh random nonce.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            nonce: parse_nonce(data)?,
            mint_fulfillment: FulfillmentFactory::from_json(field(data, "mintfulfillment")?)?,
            coin_outputs: parse_array(data, "coinoutputs", CoinOutput::from_json)?,
            miner_fees: parse_array(data, "minerfees", |v| Currency::from_json(v, "minerfees"))?,
            arbitrary_data: parse_arbitrary_data(data)?,
        })
    }

    pub fn coin_output_add(&mut self, value: Currency, condition: Condition) {
        self.coin_outputs.push(CoinOutput::new(value, condition));
    }
}

impl TransactionVariant for TransactionV129 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_COIN_CREATION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_COIN_CREATION);
        encoder.add(&self.nonce)?;
        encoder.add(&self.mint_fulfillment)?;
        encoder.add_slice(&self.coin_outputs)?;
        encoder.add_slice(&self.miner_fees)?;
        encoder.add(&self.arbitrary_data)?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("nonce".into(), self.nonce.json());
        data.insert("mintfulfillment".into(), self.mint_fulfillment.json());
        data.insert(
            "coinoutputs".into(),
            self.coin_outputs.iter().map(CoinOutput::json).collect(),
        );
        insert_fees_and_data(&mut data, &self.miner_fees, &self.arbitrary_data);
        json!({"version": TRANSACTION_VERSION_COIN_CREATION, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_COIN_CREATION);
        encoder.add_raw_bytes(&SPECIFIER_COIN_CREATION_TX);
        encoder.add(&self.nonce)?;
        encoder.add(&extra)?;
        encoder.add_slice(&self.coin_outputs)?;
        encoder.add_slice(&self.miner_fees)?;
        encoder.add(&self.arbitrary_data)?;
        Ok(hash_of(encoder.data()))
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        self.coin_outputs.clone()
    }

    fn miner_fees(&self) -> Vec<Currency> {
        self.miner_fees.clone()
    }

    fn arbitrary_data(&self) -> &[u8] {
        self.arbitrary_data.value()
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_COIN_CREATION_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Blockstake, &SPECIFIER_COIN_CREATION_TX, &binary, index))
    }
}
