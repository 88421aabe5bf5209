//! # Hashing Utilities
//!
//! TFChain uses exactly one hash function: BLAKE2b configured for a 32-byte
//! digest. It is the same construction the Rivine daemons use, so every
//! digest computed here can be compared byte-for-byte with what a node
//! reports.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::config::HASH_SIZE;

/// BLAKE2b with a 256-bit output.
type Blake2b256 = Blake2b<U32>;

/// Raw 32-byte digest.
pub type Hash = [u8; HASH_SIZE];

/// Compute the BLAKE2b-256 digest of `data`.
///
/// # Example
///
/// ```
/// use tfchain_protocol::crypto::blake2b;
///
/// let digest = blake2b(b"tfchain");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn blake2b(data: &[u8]) -> Hash {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices as if they were concatenated.
///
/// Saves building a temporary buffer when the input is naturally split,
/// e.g. `type || hash` for unlock hash checksums.
pub fn blake2b_multi(parts: &[&[u8]]) -> Hash {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
