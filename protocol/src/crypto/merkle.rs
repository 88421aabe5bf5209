//! # Merkle Tree
//!
//! The Sia-style Merkle tree. Leaves are pushed one at a time and kept on a
//! stack of subtree roots, so memory stays logarithmic in the leaf count.
//!
//! - leaf  = `H(0x00 || data)`
//! - node  = `H(0x01 || left || right)`
//!
//! When the leaf count is not a power of two, the remaining subtrees are
//! folded from the right, smallest first. Unlike Bitcoin, nothing gets
//! duplicated. An empty tree has the all-zero root.

use super::hash::{blake2b_multi, Hash};

const LEAF_PREFIX: &[u8] = &[0x00];
const NODE_PREFIX: &[u8] = &[0x01];

/// A subtree root together with its height (0 = single leaf).
#[derive(Debug, Clone, Copy)]
struct Subtree {
    height: usize,
    sum: Hash,
}

/// Incrementally built Merkle tree.
#[derive(Debug, Clone, Default)]
pub struct MerkleTree {
    stack: Vec<Subtree>,
}

impl MerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a leaf. Equal-height subtrees on top of the stack are merged
    /// immediately.
    pub fn push(&mut self, data: &[u8]) {
        let mut current = Subtree {
            height: 0,
            sum: blake2b_multi(&[LEAF_PREFIX, data]),
        };
        while let Some(top) = self.stack.last().copied() {
            if top.height != current.height {
                break;
            }
            self.stack.pop();
            current = Subtree {
                height: current.height + 1,
                sum: node_sum(&top.sum, &current.sum),
            };
        }
        self.stack.push(current);
    }

    /// Number of leaves pushed so far.
    pub fn len(&self) -> usize {
        self.stack.iter().map(|s| 1usize << s.height).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The Merkle root of all leaves pushed so far.
    pub fn root(&self) -> Hash {
        let mut iter = self.stack.iter().rev();
        let Some(last) = iter.next() else {
            return [0u8; 32];
        };
        iter.fold(last.sum, |acc, left| node_sum(&left.sum, &acc))
    }
}

fn node_sum(left: &Hash, right: &Hash) -> Hash {
    blake2b_multi(&[NODE_PREFIX, left, right])
}
