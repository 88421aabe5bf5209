// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # TFChain Protocol: Core Types Library
//!
//! Client-side value types and transaction formats for TFChain, a ledger
//! built on the Rivine protocol. The library encodes, decodes and hashes.
//! It does not validate chain state, talk to peers or hold keys.
//!
//! Every ledger value has two deterministic binary forms and one canonical
//! JSON form:
//!
//! - **Sia encoding**: fixed-width. Integers are 8 bytes, slices carry a
//!   u64 length prefix. Used for most signature hashes and identifiers.
//! - **Rivine encoding**: compact. Integers are written at the width the
//!   caller asks for, slices carry a 1-4 byte variable-length prefix.
//!   Used by the newer transaction versions on the wire.
//! - **JSON**: the `{"type"|"version": N, "data": {...}}` shape the
//!   explorers and daemons speak.
//!
//! ## Architecture
//!
//! - **encoding**: the two object encoders and their double-dispatch traits.
//! - **crypto**: BLAKE2b-256 hashing and the Sia-style Merkle tree.
//! - **types**: primitive values, unlock hashes, conditions, fulfillments
//!   and the 3Bot / ERC20 helper types.
//! - **transaction**: the versioned transaction family, signature hashes,
//!   output ids and the version-driven factory.
//! - **config**: protocol constants: units, specifiers, fee schedules.
//!
//! ## Usage
//!
//! ```
//! use tfchain_protocol::transaction::{TransactionFactory, TransactionVariant};
//!
//! let json = serde_json::json!({"version": 1, "data": {}});
//! let txn = TransactionFactory::from_json(&json).unwrap();
//! let bytes = txn.binary_encode().unwrap();
//! assert_eq!(bytes[0], 1);
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod transaction;
pub mod types;
