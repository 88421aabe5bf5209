//! ERC20 bridge transactions.
//!
//! - **v208** burns TFT on this chain so the bridge can mint the same
//!   amount of ERC20 tokens at an Ethereum address.
//! - **v209** is the reverse: coins created here for tokens burned on
//!   Ethereum, tied to the Ethereum block and transaction that burned them.
//! - **v210** registers the ERC20 address derived from a TFT address so
//!   tokens sent there can be withdrawn back.
//!
//! All three are written in the Rivine encoding.

use serde_json::{json, Map, Value};

use super::io::{CoinInput, CoinOutput};
use super::{
    extension_output_id, hash_of, rivine_add_optional, rivine_add_parent_ids, OutputKind,
    SignatureExtra, TransactionVariant,
};
use crate::config::{
    ERC20_ADDRESS_REGISTRATION_FEE, SPECIFIER_ERC20_ADDRESS_REGISTRATION_TX,
    SPECIFIER_ERC20_COIN_CREATION_TX, SPECIFIER_ERC20_CONVERT_TX,
    TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION, TRANSACTION_VERSION_ERC20_COIN_CREATION,
    TRANSACTION_VERSION_ERC20_CONVERSION,
};
use crate::encoding::{RivineEncoder, SiaEncoder};
use crate::types::json::{field, opt_field, parse_array};
use crate::types::{
    Currency, ERC20Address, ERC20Hash, Hash, PublicKey, Signature, TypeError, UnlockHash,
};

fn parse_refund(data: &Value) -> Result<Option<CoinOutput>, TypeError> {
    opt_field(data, "refundcoinoutput")
        .map(CoinOutput::from_json)
        .transpose()
}

fn insert_inputs_and_refund(
    data: &mut Map<String, Value>,
    coin_inputs: &[CoinInput],
    refund: Option<&CoinOutput>,
) {
    data.insert(
        "coininputs".into(),
        coin_inputs.iter().map(CoinInput::json).collect(),
    );
    if let Some(refund) = refund {
        data.insert("refundcoinoutput".into(), refund.json());
    }
}

// ---------------------------------------------------------------------------
// v208: convert TFT to ERC20 tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionV208 {
    /// Ethereum address receiving the tokens.
    pub address: ERC20Address,
    pub value: Currency,
    pub transaction_fee: Currency,
    pub coin_inputs: Vec<CoinInput>,
    pub refund_coin_output: Option<CoinOutput>,
}

impl TransactionV208 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            address: ERC20Address::from_json(field(data, "address")?, "address")?,
            value: Currency::from_json(field(data, "value")?, "value")?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            refund_coin_output: parse_refund(data)?,
        })
    }
}

impl TransactionVariant for TransactionV208 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_ERC20_CONVERSION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_CONVERSION);
        encoder.add(&self.address)?;
        encoder.add(&self.value)?;
        encoder.add(&self.transaction_fee)?;
        encoder.add_slice(&self.coin_inputs)?;
        rivine_add_optional(&mut encoder, self.refund_coin_output.as_ref())?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("address".into(), self.address.json());
        data.insert("value".into(), self.value.json());
        data.insert("txfee".into(), self.transaction_fee.json());
        insert_inputs_and_refund(&mut data, &self.coin_inputs, self.refund_coin_output.as_ref());
        json!({"version": TRANSACTION_VERSION_ERC20_CONVERSION, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_CONVERSION);
        encoder.add_raw_bytes(&SPECIFIER_ERC20_CONVERT_TX);
        encoder.add(&self.address)?;
        encoder.add(&self.value)?;
        encoder.add(&extra)?;
        rivine_add_parent_ids(&mut encoder, &self.coin_inputs)?;
        encoder.add(&self.transaction_fee)?;
        rivine_add_optional(&mut encoder, self.refund_coin_output.as_ref())?;
        Ok(hash_of(encoder.data()))
    }

    fn coin_inputs(&self) -> &[CoinInput] {
        &self.coin_inputs
    }

    fn coin_inputs_mut(&mut self) -> &mut [CoinInput] {
        &mut self.coin_inputs
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        self.refund_coin_output.iter().cloned().collect()
    }

    fn miner_fees(&self) -> Vec<Currency> {
        vec![self.transaction_fee]
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_ERC20_CONVERT_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Blockstake, &SPECIFIER_ERC20_CONVERT_TX, &binary, index))
    }
}

// ---------------------------------------------------------------------------
// v209: coins created for burned ERC20 tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionV209 {
    /// TFT address receiving the coins.
    pub address: UnlockHash,
    pub value: Currency,
    pub transaction_fee: Currency,
    pub block_id: ERC20Hash,
    pub transaction_id: ERC20Hash,
}

impl TransactionV209 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            address: UnlockHash::from_json(field(data, "address")?, "address")?,
            value: Currency::from_json(field(data, "value")?, "value")?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            block_id: ERC20Hash::from_json(field(data, "blockid")?, "blockid")?,
            transaction_id: ERC20Hash::from_json(field(data, "txid")?, "txid")?,
        })
    }
}

impl TransactionVariant for TransactionV209 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_ERC20_COIN_CREATION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_COIN_CREATION);
        encoder.add(&self.address)?;
        encoder.add(&self.value)?;
        encoder.add(&self.transaction_fee)?;
        encoder.add(&self.block_id)?;
        encoder.add(&self.transaction_id)?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        json!({
            "version": TRANSACTION_VERSION_ERC20_COIN_CREATION,
            "data": {
                "address": self.address.json(),
                "value": self.value.json(),
                "txfee": self.transaction_fee.json(),
                "blockid": self.block_id.json(),
                "txid": self.transaction_id.json(),
            }
        })
    }

    /// Unlike its siblings this hash writes the currencies Sia style.
    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = SiaEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_COIN_CREATION);
        encoder.add_raw_bytes(&SPECIFIER_ERC20_COIN_CREATION_TX);
        encoder.add(&extra)?;
        encoder.add(&self.address)?;
        encoder.add(&self.value)?;
        encoder.add(&self.transaction_fee)?;
        encoder.add(&self.block_id)?;
        encoder.add(&self.transaction_id)?;
        Ok(hash_of(encoder.data()))
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        vec![CoinOutput::new(self.value, self.address.into())]
    }

    fn miner_fees(&self) -> Vec<Currency> {
        vec![self.transaction_fee]
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_ERC20_COIN_CREATION_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_ERC20_COIN_CREATION_TX,
            &binary,
            index,
        ))
    }
}

// ---------------------------------------------------------------------------
// v210: ERC20 address registration
// ---------------------------------------------------------------------------

/// Registers the ERC20 address belonging to `public_key`.
///
/// Both the TFT address and the ERC20 address are derived from the key and
/// only appear in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionV210 {
    pub public_key: PublicKey,
    pub signature: Signature,
    pub registration_fee: Currency,
    pub transaction_fee: Currency,
    pub coin_inputs: Vec<CoinInput>,
    pub refund_coin_output: Option<CoinOutput>,
}

impl Default for TransactionV210 {
    fn default() -> Self {
        Self {
            public_key: PublicKey::default(),
            signature: Signature::default(),
            registration_fee: Currency::from_tft(ERC20_ADDRESS_REGISTRATION_FEE),
            transaction_fee: Currency::default(),
            coin_inputs: Vec::new(),
            refund_coin_output: None,
        }
    }
}

impl TransactionV210 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            public_key: PublicKey::from_json(field(data, "pubkey")?, "pubkey")?,
            signature: Signature::from_json(data.get("signature"), "signature")?,
            registration_fee: Currency::from_json(field(data, "regfee")?, "regfee")?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            refund_coin_output: parse_refund(data)?,
        })
    }

    pub fn tft_address(&self) -> UnlockHash {
        self.public_key.unlockhash()
    }

    pub fn erc20_address(&self) -> ERC20Address {
        ERC20Address::from_unlockhash(&self.tft_address())
    }
}

impl TransactionVariant for TransactionV210 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION);
        encoder.add(&self.public_key)?;
        encoder.add(&self.signature)?;
        encoder.add(&self.registration_fee)?;
        encoder.add(&self.transaction_fee)?;
        encoder.add_slice(&self.coin_inputs)?;
        rivine_add_optional(&mut encoder, self.refund_coin_output.as_ref())?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("pubkey".into(), self.public_key.json());
        data.insert("tftaddress".into(), self.tft_address().json());
        data.insert("erc20address".into(), self.erc20_address().json());
        data.insert("signature".into(), self.signature.json());
        data.insert("regfee".into(), self.registration_fee.json());
        data.insert("txfee".into(), self.transaction_fee.json());
        insert_inputs_and_refund(&mut data, &self.coin_inputs, self.refund_coin_output.as_ref());
        json!({"version": TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION);
        encoder.add_raw_bytes(&SPECIFIER_ERC20_ADDRESS_REGISTRATION_TX);
        encoder.add(&self.public_key)?;
        encoder.add(&extra)?;
        rivine_add_parent_ids(&mut encoder, &self.coin_inputs)?;
        encoder.add(&self.registration_fee)?;
        encoder.add(&self.transaction_fee)?;
        rivine_add_optional(&mut encoder, self.refund_coin_output.as_ref())?;
        Ok(hash_of(encoder.data()))
    }

    fn coin_inputs(&self) -> &[CoinInput] {
        &self.coin_inputs
    }

    fn coin_inputs_mut(&mut self) -> &mut [CoinInput] {
        &mut self.coin_inputs
    }

    fn coin_outputs(&self) -> Vec<CoinOutput> {
        self.refund_coin_output.iter().cloned().collect()
    }

    fn miner_fees(&self) -> Vec<Currency> {
        vec![self.transaction_fee]
    }

    fn coin_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Coin,
            &SPECIFIER_ERC20_ADDRESS_REGISTRATION_TX,
            &binary,
            index,
        ))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_ERC20_ADDRESS_REGISTRATION_TX,
            &binary,
            index,
        ))
    }
}
