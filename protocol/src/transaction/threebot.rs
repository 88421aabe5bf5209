//! 3Bot transactions.
//!
//! | version | transaction       | signed by                         |
//! |---------|-------------------|-----------------------------------|
//! | 144     | registration      | the new bot's key (`sender`)      |
//! | 145     | record update     | the bot's key (`sender`)          |
//! | 146     | name transfer     | both bots (`sender`, `receiver`)  |
//!
//! All three use the Rivine encoding on the wire and for their signature
//! hashes. On top of the regular transaction fee they pay bot fees into
//! the coin inputs: see [`compute_monthly_bot_fees`] and each type's
//! `required_bot_fees`.

use serde_json::{json, Map, Value};

use super::io::{CoinInput, CoinOutput};
use super::{
    extension_output_id, hash_of, rivine_add_optional, rivine_add_parent_ids, OutputKind,
    SignatureExtra, TransactionVariant,
};
use crate::config::{
    BOT_FEE_ADDITIONAL_NAME, BOT_FEE_MONTHLY, BOT_FEE_NETWORK_ADDRESS_UPDATE, BOT_FEE_REGISTRATION,
    BOT_MONTHS_MAX, BOT_RECORD_ENTRIES_MAX, ED25519_SIGNATURE_SIZE, SPECIFIER_BOT_NAME_TRANSFER_TX,
    SPECIFIER_BOT_RECORD_UPDATE_TX, SPECIFIER_BOT_REGISTRATION_TX,
    TRANSACTION_VERSION_BOT_NAME_TRANSFER, TRANSACTION_VERSION_BOT_RECORD_UPDATE,
    TRANSACTION_VERSION_BOT_REGISTRATION,
};
use crate::encoding::RivineEncoder;
use crate::types::json::{field, opt_field, parse_array, u64_field, u64_field_or_zero};
use crate::types::{BotId, BotName, Currency, Hash, NetworkAddress, PublicKey, Signature, TypeError};

const MASK_ADDRESSES: u8 = 32;
const MASK_NAMES: u8 = 64;
const MASK_REFUND: u8 = 128;
const NAME_TRANSFER_REFUND_FLAG: u8 = 16;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Fee for prepaying `months` months of bot activity.
///
/// Paying a year or more up front gets a 30% discount, paying the maximum
/// of 24 months gets 50%.
pub fn compute_monthly_bot_fees(months: u8) -> Currency {
    let fees = Currency::from_tft(BOT_FEE_MONTHLY) * u64::from(months);
    match months {
        0..=11 => fees,
        12..=23 => fees * 7 / 10,
        _ => fees / 2,
    }
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Public key + signature proving control over a bot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotIdentification {
    pub public_key: PublicKey,
    pub signature: Signature,
}

impl BotIdentification {
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

/// One side of a name transfer: the bot and its signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotSignature {
    pub id: BotId,
    pub signature: Signature,
}

impl BotSignature {
    fn from_json(value: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            id: bot_id_field(value)?,
            signature: Signature::from_json(value.get("signature"), "signature")?,
        })
    }

    fn json(&self) -> Value {
        json!({"id": self.id, "signature": self.signature.json()})
    }
}

fn bot_id_field(value: &Value) -> Result<BotId, TypeError> {
    BotId::try_from(u64_field(value, "id")?).map_err(|_| TypeError::InvalidJson {
        field: "id".into(),
        expected: "32-bit bot id",
    })
}

fn months_field(data: &Value) -> Result<u8, TypeError> {
    let months = u64_field_or_zero(data, "nrofmonths")?;
    u8::try_from(months)
        .ok()
        .filter(|m| *m <= BOT_MONTHS_MAX)
        .ok_or(TypeError::TooManyEntries {
            field: "nrofmonths",
            found: months as usize,
            max: BOT_MONTHS_MAX as usize,
        })
}

fn check_entries(field: &'static str, found: usize) -> Result<u8, TypeError> {
    if found > BOT_RECORD_ENTRIES_MAX {
        return Err(TypeError::TooManyEntries {
            field,
            found,
            max: BOT_RECORD_ENTRIES_MAX,
        });
    }
    Ok(found as u8)
}

fn parse_addresses(data: &Value, key: &str) -> Result<Vec<NetworkAddress>, TypeError> {
    parse_array(data, key, |v| NetworkAddress::from_json(v, "addresses"))
}

fn parse_names(data: &Value, key: &str) -> Result<Vec<BotName>, TypeError> {
    parse_array(data, key, |v| BotName::from_json(v, "names"))
}

fn parse_refund(data: &Value) -> Result<Option<CoinOutput>, TypeError> {
    opt_field(data, "refundcoinoutput")
        .map(CoinOutput::from_json)
        .transpose()
}

fn insert_common(
    data: &mut Map<String, Value>,
    fee: &Currency,
    coin_inputs: &[CoinInput],
    refund: Option<&CoinOutput>,
) {
    data.insert("txfee".into(), fee.json());
    data.insert(
        "coininputs".into(),
        coin_inputs.iter().map(CoinInput::json).collect(),
    );
    if let Some(refund) = refund {
        data.insert("refundcoinoutput".into(), refund.json());
    }
}

fn json_list<T>(items: &[T], to_json: fn(&T) -> Value) -> Value {
    items.iter().map(to_json).collect()
}

/// Writes `fee || coin inputs || refund?`, the tail every bot transaction
/// shares on the wire.
fn rivine_add_funding(
    encoder: &mut RivineEncoder,
    fee: &Currency,
    coin_inputs: &[CoinInput],
    refund: Option<&CoinOutput>,
) -> Result<(), TypeError> {
    encoder.add(fee)?;
    encoder.add_slice(coin_inputs)?;
    if let Some(refund) = refund {
        encoder.add(refund)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// v144: registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionV144 {
    pub addresses: Vec<NetworkAddress>,
    pub names: Vec<BotName>,
    pub number_of_months: u8,
    pub transaction_fee: Currency,
    pub coin_inputs: Vec<CoinInput>,
    pub refund_coin_output: Option<CoinOutput>,
    pub identification: BotIdentification,
}

impl TransactionV144 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            addresses: parse_addresses(data, "addresses")?,
            names: parse_names(data, "names")?,
            number_of_months: months_field(data)?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            refund_coin_output: parse_refund(data)?,
            identification: BotIdentification::from_json(field(data, "identification")?)?,
        })
    }

    /// 90 TFT, 50 TFT per name beyond the first, plus the monthly fee.
    pub fn required_bot_fees(&self) -> Currency {
        let extra_names = self.names.len().saturating_sub(1) as u64;
        Currency::from_tft(BOT_FEE_REGISTRATION)
            + Currency::from_tft(BOT_FEE_ADDITIONAL_NAME) * extra_names
            + compute_monthly_bot_fees(self.number_of_months)
    }

    /// The signature is written raw, so an unsigned registration gets 64
    /// zero bytes in its place.
    fn raw_signature(&self) -> Result<Vec<u8>, TypeError> {
        match self.identification.signature.as_bytes().len() {
            0 => Ok(vec![0u8; ED25519_SIGNATURE_SIZE]),
            ED25519_SIGNATURE_SIZE => Ok(self.identification.signature.as_bytes().to_vec()),
            found => Err(TypeError::FixedSizeMismatch {
                expected: ED25519_SIGNATURE_SIZE,
                found,
            }),
        }
    }
}

impl TransactionVariant for TransactionV144 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_BOT_REGISTRATION
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let addresses = check_entries("addresses", self.addresses.len())?;
        let names = check_entries("names", self.names.len())?;

        let mut mask = self.number_of_months;
        if addresses > 0 {
            mask |= MASK_ADDRESSES;
        }
        if names > 0 {
            mask |= MASK_NAMES;
        }
        if self.refund_coin_output.is_some() {
            mask |= MASK_REFUND;
        }

        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_REGISTRATION);
        encoder.add_byte(mask);
        if addresses > 0 || names > 0 {
            encoder.add_byte(addresses | (names << 4));
        }
        for address in &self.addresses {
            encoder.add(address)?;
        }
        for name in &self.names {
            encoder.add(name)?;
        }
        rivine_add_funding(
            &mut encoder,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        )?;
        encoder.add(&self.identification.public_key)?;
        encoder.add_raw_bytes(&self.raw_signature()?);
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("addresses".into(), json_list(&self.addresses, NetworkAddress::json));
        data.insert("names".into(), json_list(&self.names, BotName::json));
        data.insert("nrofmonths".into(), self.number_of_months.into());
        insert_common(
            &mut data,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        );
        data.insert("identification".into(), self.identification.json());
        json!({"version": TRANSACTION_VERSION_BOT_REGISTRATION, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        tracing::trace!(?extra, "computing bot registration signature hash");
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_REGISTRATION);
        encoder.add_raw_bytes(&SPECIFIER_BOT_REGISTRATION_TX);
        encoder.add(&extra)?;
        encoder.add_slice(&self.addresses)?;
        encoder.add_slice(&self.names)?;
        encoder.add_byte(self.number_of_months);
        rivine_add_parent_ids(&mut encoder, &self.coin_inputs)?;
        encoder.add(&self.transaction_fee)?;
        rivine_add_optional(&mut encoder, self.refund_coin_output.as_ref())?;
        encoder.add(&self.identification.public_key)?;
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
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_BOT_REGISTRATION_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_BOT_REGISTRATION_TX,
            &binary,
            index,
        ))
    }
}

// ---------------------------------------------------------------------------
// v145: record update
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionV145 {
    pub bot_id: BotId,
    pub addresses_to_add: Vec<NetworkAddress>,
    pub addresses_to_remove: Vec<NetworkAddress>,
    pub names_to_add: Vec<BotName>,
    pub names_to_remove: Vec<BotName>,
    pub number_of_months: u8,
    pub transaction_fee: Currency,
    pub coin_inputs: Vec<CoinInput>,
    pub refund_coin_output: Option<CoinOutput>,
    pub signature: Signature,
}

impl TransactionV145 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        let addresses = opt_field(data, "addresses").unwrap_or(&Value::Null);
        let names = opt_field(data, "names").unwrap_or(&Value::Null);
        Ok(Self {
            bot_id: bot_id_field(data)?,
            addresses_to_add: parse_addresses(addresses, "add")?,
            addresses_to_remove: parse_addresses(addresses, "remove")?,
            names_to_add: parse_names(names, "add")?,
            names_to_remove: parse_names(names, "remove")?,
            number_of_months: months_field(data)?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            refund_coin_output: parse_refund(data)?,
            signature: Signature::from_json(data.get("signature"), "signature")?,
        })
    }

    fn has_address_changes(&self) -> bool {
        !self.addresses_to_add.is_empty() || !self.addresses_to_remove.is_empty()
    }

    fn has_name_changes(&self) -> bool {
        !self.names_to_add.is_empty() || !self.names_to_remove.is_empty()
    }

    /// Monthly fee, 20 TFT when any address changes and 50 TFT per name
    /// added.
    pub fn required_bot_fees(&self) -> Currency {
        let mut fees = compute_monthly_bot_fees(self.number_of_months);
        if self.has_address_changes() {
            fees = fees + Currency::from_tft(BOT_FEE_NETWORK_ADDRESS_UPDATE);
        }
        fees + Currency::from_tft(BOT_FEE_ADDITIONAL_NAME) * self.names_to_add.len() as u64
    }
}

impl TransactionVariant for TransactionV145 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_BOT_RECORD_UPDATE
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let addresses_added = check_entries("addresses.add", self.addresses_to_add.len())?;
        let addresses_removed = check_entries("addresses.remove", self.addresses_to_remove.len())?;
        let names_added = check_entries("names.add", self.names_to_add.len())?;
        let names_removed = check_entries("names.remove", self.names_to_remove.len())?;

        let mut mask = self.number_of_months;
        if self.has_address_changes() {
            mask |= MASK_ADDRESSES;
        }
        if self.has_name_changes() {
            mask |= MASK_NAMES;
        }
        if self.refund_coin_output.is_some() {
            mask |= MASK_REFUND;
        }

        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_RECORD_UPDATE);
        encoder.add_int32(self.bot_id)?;
        encoder.add_byte(mask);
        if self.has_address_changes() {
            encoder.add_byte(addresses_added | (addresses_removed << 4));
            for address in self.addresses_to_add.iter().chain(&self.addresses_to_remove) {
                encoder.add(address)?;
            }
        }
        if self.has_name_changes() {
            encoder.add_byte(names_added | (names_removed << 4));
            for name in self.names_to_add.iter().chain(&self.names_to_remove) {
                encoder.add(name)?;
            }
        }
        rivine_add_funding(
            &mut encoder,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        )?;
        encoder.add(&self.signature)?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("id".into(), self.bot_id.into());
        data.insert(
            "addresses".into(),
            json!({
                "add": json_list(&self.addresses_to_add, NetworkAddress::json),
                "remove": json_list(&self.addresses_to_remove, NetworkAddress::json),
            }),
        );
        data.insert(
            "names".into(),
            json!({
                "add": json_list(&self.names_to_add, BotName::json),
                "remove": json_list(&self.names_to_remove, BotName::json),
            }),
        );
        data.insert("nrofmonths".into(), self.number_of_months.into());
        insert_common(
            &mut data,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        );
        data.insert("signature".into(), self.signature.json());
        json!({"version": TRANSACTION_VERSION_BOT_RECORD_UPDATE, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        tracing::trace!(bot_id = self.bot_id, ?extra, "computing bot record update signature hash");
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_RECORD_UPDATE);
        encoder.add_raw_bytes(&SPECIFIER_BOT_RECORD_UPDATE_TX);
        encoder.add_int32(self.bot_id)?;
        encoder.add(&extra)?;
        encoder.add_slice(&self.addresses_to_add)?;
        encoder.add_slice(&self.addresses_to_remove)?;
        encoder.add_slice(&self.names_to_add)?;
        encoder.add_slice(&self.names_to_remove)?;
        encoder.add_byte(self.number_of_months);
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
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_BOT_RECORD_UPDATE_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_BOT_RECORD_UPDATE_TX,
            &binary,
            index,
        ))
    }
}

// ---------------------------------------------------------------------------
// v146: name transfer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionV146 {
    pub sender: BotSignature,
    pub receiver: BotSignature,
    pub names: Vec<BotName>,
    pub transaction_fee: Currency,
    pub coin_inputs: Vec<CoinInput>,
    pub refund_coin_output: Option<CoinOutput>,
}

impl TransactionV146 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_data(data: &Value) -> Result<Self, TypeError> {
        Ok(Self {
            sender: BotSignature::from_json(field(data, "sender")?)?,
            receiver: BotSignature::from_json(field(data, "receiver")?)?,
            names: parse_names(data, "names")?,
            transaction_fee: Currency::from_json(field(data, "txfee")?, "txfee")?,
            coin_inputs: parse_array(data, "coininputs", CoinInput::from_json)?,
            refund_coin_output: parse_refund(data)?,
        })
    }

    /// 50 TFT per transferred name.
    pub fn required_bot_fees(&self) -> Currency {
        Currency::from_tft(BOT_FEE_ADDITIONAL_NAME) * self.names.len() as u64
    }
}

impl TransactionVariant for TransactionV146 {
    fn version(&self) -> u8 {
        TRANSACTION_VERSION_BOT_NAME_TRANSFER
    }

    fn binary_encode(&self) -> Result<Vec<u8>, TypeError> {
        let mut header = check_entries("names", self.names.len())?;
        if self.refund_coin_output.is_some() {
            header |= NAME_TRANSFER_REFUND_FLAG;
        }

        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_NAME_TRANSFER);
        encoder.add_int32(self.sender.id)?;
        encoder.add(&self.sender.signature)?;
        encoder.add_int32(self.receiver.id)?;
        encoder.add(&self.receiver.signature)?;
        encoder.add_byte(header);
        for name in &self.names {
            encoder.add(name)?;
        }
        rivine_add_funding(
            &mut encoder,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        )?;
        Ok(encoder.into_bytes())
    }

    fn json(&self) -> Value {
        let mut data = Map::new();
        data.insert("sender".into(), self.sender.json());
        data.insert("receiver".into(), self.receiver.json());
        data.insert("names".into(), json_list(&self.names, BotName::json));
        insert_common(
            &mut data,
            &self.transaction_fee,
            &self.coin_inputs,
            self.refund_coin_output.as_ref(),
        );
        json!({"version": TRANSACTION_VERSION_BOT_NAME_TRANSFER, "data": data})
    }

    fn signature_hash_get(&self, extra: SignatureExtra) -> Result<Hash, TypeError> {
        tracing::trace!(
            sender = self.sender.id,
            receiver = self.receiver.id,
            ?extra,
            "computing bot name transfer signature hash"
        );
        let mut encoder = RivineEncoder::new();
        encoder.add_byte(TRANSACTION_VERSION_BOT_NAME_TRANSFER);
        encoder.add_raw_bytes(&SPECIFIER_BOT_NAME_TRANSFER_TX);
        encoder.add_int32(self.sender.id)?;
        encoder.add_int32(self.receiver.id)?;
        encoder.add(&extra)?;
        encoder.add_slice(&self.names)?;
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
        Ok(extension_output_id(OutputKind::Coin, &SPECIFIER_BOT_NAME_TRANSFER_TX, &binary, index))
    }

    fn blockstake_outputid_new(&self, index: u64) -> Result<Hash, TypeError> {
        let binary = self.binary_encode()?;
        Ok(extension_output_id(
            OutputKind::Blockstake,
            &SPECIFIER_BOT_NAME_TRANSFER_TX,
            &binary,
            index,
        ))
    }
}
