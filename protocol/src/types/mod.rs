//! # Ledger Value Types
//!
//! Everything that can sit inside a TFChain transaction, from the leaves up:
//!
//! ```text
//! primitives.rs  : BinaryData, Hash, Currency, Blockstake
//! keys.rs        : PublicKey, Signature
//! unlockhash.rs  : UnlockHash and its checksummed string form
//! lock.rs        : OutputLock (block heights, timestamps, "+7d", "30/11/2020")
//! conditions.rs  : the condition family + ConditionFactory
//! fulfillments.rs: the fulfillment family + FulfillmentFactory
//! erc20.rs       : Ethereum-side addresses and hashes
//! threebot.rs    : 3Bot network addresses and names
//! json.rs        : small helpers for picking apart `serde_json::Value`s
//! ```
//!
//! Every type here writes itself in both binary dialects (see
//! [`crate::encoding`]) and has a canonical JSON form. Binary decoding is
//! not supported: values enter the library as JSON and leave as bytes,
//! hashes or JSON.

pub mod conditions;
pub mod erc20;
pub mod error;
pub mod fulfillments;
pub(crate) mod json;
pub mod keys;
pub mod lock;
pub mod primitives;
pub mod threebot;
pub mod unlockhash;

pub use conditions::{
    AtomicSwapCondition, Condition, ConditionFactory, MultiSignatureCondition,
    TimeLockedCondition,
};
pub use erc20::{ERC20Address, ERC20Hash};
pub use error::TypeError;
pub use fulfillments::{
    AtomicSwapFulfillment, AtomicSwapSecret, Fulfillment, FulfillmentFactory,
    MultiSignatureFulfillment, PublicKeySignaturePair, SingleSignatureFulfillment,
};
pub use keys::{PublicKey, PublicKeySpecifier, Signature};
pub use lock::OutputLock;
pub use primitives::{BinaryData, Blockstake, Currency, Hash, StrEncoding};
pub use threebot::{BotId, BotName, NetworkAddress};
pub use unlockhash::{UnlockHash, UnlockHashType};
