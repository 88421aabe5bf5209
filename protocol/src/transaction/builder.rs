//! Fluent construction of v1 transfers.
//!
//! The [`TransactionBuilder`] collects inputs, outputs and fees and hands
//! back an unsigned [`TransactionV1`]. Fulfillments can be left with empty
//! signatures: the signature hash never covers them, so they can be filled
//! in afterwards through
//! [`TransactionVariant::coin_inputs_mut`](super::TransactionVariant::coin_inputs_mut).

use super::io::{BlockstakeOutput, CoinInput, CoinOutput};
use super::TransactionV1;
use crate::types::{Blockstake, Condition, Currency, Fulfillment, Hash, TypeError, UnlockHash};

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Builder for [`TransactionV1`].
///
/// ```rust
/// use tfchain_protocol::transaction::{TransactionBuilder, TransactionVariant};
/// use tfchain_protocol::types::{Currency, FulfillmentFactory, Hash, PublicKey, Signature};
///
/// let key = PublicKey::ed25519([7; 32]);
/// let txn = TransactionBuilder::new()
///     .coin_input(Hash::default(), FulfillmentFactory::single_signature_new(key, Signature::default()))
///     .pay_to(key.unlockhash(), Currency::from_tft(9))
///     .miner_fee(Currency::from_tft(1))
///     .arbitrary_data(b"hello".to_vec())
///     .build()
///     .unwrap();
///
/// assert_eq!(txn.version(), 1);
/// assert_eq!(txn.coin_outputs().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    coin_inputs: Vec<CoinInput>,
    coin_outputs: Vec<CoinOutput>,
    blockstake_inputs: Vec<CoinInput>,
    blockstake_outputs: Vec<BlockstakeOutput>,
    miner_fees: Vec<Currency>,
    arbitrary_data: Option<Vec<u8>>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend the coin output `parent_id`.
    pub fn coin_input(mut self, parent_id: Hash, fulfillment: Fulfillment) -> Self {
        self.coin_inputs.push(CoinInput::new(parent_id, fulfillment));
        self
    }

    pub fn coin_output(mut self, value: Currency, condition: Condition) -> Self {
        self.coin_outputs.push(CoinOutput::new(value, condition));
        self
    }

    /// Shorthand for a coin output locked to a plain address.
    pub fn pay_to(self, address: UnlockHash, value: Currency) -> Self {
        self.coin_output(value, address.into())
    }

    pub fn blockstake_input(mut self, parent_id: Hash, fulfillment: Fulfillment) -> Self {
        self.blockstake_inputs.push(CoinInput::new(parent_id, fulfillment));
        self
    }

    pub fn blockstake_output(mut self, value: Blockstake, condition: Condition) -> Self {
        self.blockstake_outputs.push(BlockstakeOutput::new(value, condition));
        self
    }

    pub fn miner_fee(mut self, fee: Currency) -> Self {
        self.miner_fees.push(fee);
        self
    }

    /// Replaces any arbitrary data set before.
    pub fn arbitrary_data(mut self, data: Vec<u8>) -> Self {
        self.arbitrary_data = Some(data);
        self
    }

    /// Consumes the builder and produces the transaction.
    pub fn build(self) -> Result<TransactionV1, TypeError> {
        let mut txn = TransactionV1::new();
        txn.coin_inputs = self.coin_inputs;
        txn.coin_outputs = self.coin_outputs;
        txn.blockstake_inputs = self.blockstake_inputs;
        txn.blockstake_outputs = self.blockstake_outputs;
        txn.miner_fees = self.miner_fees;
        if let Some(data) = self.arbitrary_data {
            txn.arbitrary_data_set(data)?;
        }
        Ok(txn)
    }
}
