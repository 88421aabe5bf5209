//! Transaction JSON dispatch and empty constructors.

use serde_json::Value;

use super::{
    Transaction, TransactionV1, TransactionV128, TransactionV129, TransactionV144,
    TransactionV145, TransactionV146, TransactionV208, TransactionV209, TransactionV210,
};
use crate::config::{
    TRANSACTION_VERSION_BOT_NAME_TRANSFER, TRANSACTION_VERSION_BOT_RECORD_UPDATE,
    TRANSACTION_VERSION_BOT_REGISTRATION, TRANSACTION_VERSION_COIN_CREATION,
    TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION, TRANSACTION_VERSION_ERC20_COIN_CREATION,
    TRANSACTION_VERSION_ERC20_CONVERSION, TRANSACTION_VERSION_LEGACY,
    TRANSACTION_VERSION_MINTER_DEFINITION, TRANSACTION_VERSION_STANDARD,
};
use crate::types::json::{field, u64_field};
use crate::types::TypeError;

/// Builds transactions from their `{"version": N, "data": {...}}` JSON, or
/// empty ones to fill in by hand.
pub struct TransactionFactory;

impl TransactionFactory {
    /// Parse any supported transaction.
    ///
    /// Version 0 documents come back as [`Transaction::Standard`] with the
    /// legacy flag set, so they keep their own wire layout.
    pub fn from_json(value: &Value) -> Result<Transaction, TypeError> {
        let version = u64_field(value, "version")?;
        let data = field(value, "data")?;
        tracing::debug!(version, "decoding transaction");

        let Ok(tag) = u8::try_from(version) else {
            return Err(TypeError::UnknownTransactionVersion(version));
        };
        let txn = match tag {
            TRANSACTION_VERSION_LEGACY => {
                Transaction::Standard(TransactionV1::from_legacy_json_data(data)?)
            }
            TRANSACTION_VERSION_STANDARD => {
                Transaction::Standard(TransactionV1::from_json_data(data)?)
            }
            TRANSACTION_VERSION_MINTER_DEFINITION => {
                Transaction::MinterDefinition(TransactionV128::from_json_data(data)?)
            }
            TRANSACTION_VERSION_COIN_CREATION => {
                Transaction::CoinCreation(TransactionV129::from_json_data(data)?)
            }
            TRANSACTION_VERSION_BOT_REGISTRATION => {
                Transaction::BotRegistration(TransactionV144::from_json_data(data)?)
            }
            TRANSACTION_VERSION_BOT_RECORD_UPDATE => {
                Transaction::BotRecordUpdate(TransactionV145::from_json_data(data)?)
            }
            TRANSACTION_VERSION_BOT_NAME_TRANSFER => {
                Transaction::BotNameTransfer(TransactionV146::from_json_data(data)?)
            }
            TRANSACTION_VERSION_ERC20_CONVERSION => {
                Transaction::ERC20Convert(TransactionV208::from_json_data(data)?)
            }
            TRANSACTION_VERSION_ERC20_COIN_CREATION => {
                Transaction::ERC20CoinCreation(TransactionV209::from_json_data(data)?)
            }
            TRANSACTION_VERSION_ERC20_ADDRESS_REGISTRATION => {
                Transaction::ERC20AddressRegistration(TransactionV210::from_json_data(data)?)
            }
            _ => return Err(TypeError::UnknownTransactionVersion(version)),
        };
        Ok(txn)
    }

    pub fn standard_new() -> TransactionV1 {
        TransactionV1::new()
    }

    pub fn minter_definition_new() -> TransactionV128 {
        TransactionV128::new()
    }

    pub fn coin_creation_new() -> TransactionV129 {
        TransactionV129::new()
    }

    pub fn bot_registration_new() -> TransactionV144 {
        TransactionV144::new()
    }

    pub fn bot_record_update_new() -> TransactionV145 {
        TransactionV145::new()
    }

    pub fn bot_name_transfer_new() -> TransactionV146 {
        TransactionV146::new()
    }

    pub fn erc20_convert_new() -> TransactionV208 {
        TransactionV208::new()
    }

    pub fn erc20_coin_creation_new() -> TransactionV209 {
        TransactionV209::new()
    }

    pub fn erc20_address_registration_new() -> TransactionV210 {
        TransactionV210::new()
    }
}
