//! # Cryptographic Primitives for TFChain
//!
//! Everything the ledger hashes goes through BLAKE2b with a 256-bit
//! digest. Identifiers, unlock hashes, signature hashes and Merkle roots
//! are all built from it.
//!
//! - **hash**: one-shot and multi-part BLAKE2b-256.
//! - **merkle**: the stack-based Merkle tree used for multisig unlock hashes.
//!
//! Signatures are produced elsewhere (wallets, hardware keys). This library
//! only needs the public half of an Ed25519 key, which comes straight from
//! `ed25519-dalek`.

pub mod hash;
pub mod merkle;

pub use hash::{blake2b, blake2b_multi, Hash};
pub use merkle::MerkleTree;
