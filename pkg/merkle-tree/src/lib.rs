#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![deny(missing_docs)]

//! # Incremental Merkle tree
//!
//! An append-only Merkle accumulator of note commitments, mirroring the commitment log kept by
//! the shielded pool contract.
//!
//! ```rust
//! # use merkle_tree::*;
//! let mut tree = IncrementalMerkleTree::new(20).unwrap();
//!
//! // leaves are assigned indices in insertion order
//! assert_eq!(tree.insert(Element::new(1)).unwrap(), 0);
//! assert_eq!(tree.insert(Element::new(2)).unwrap(), 1);
//!
//! // a proof links a leaf to the current root
//! let proof = tree.proof(1).unwrap();
//! assert!(verify_proof(&proof));
//! assert_eq!(proof.root, tree.root());
//! ```
//!
//! ## Structure
//!
//! A tree of depth `d` has `2^d` leaf slots. Slots that have not been filled yet are treated as
//! holding the tree's zero leaf (usually [`Element::ZERO`]), and every empty subtree of height `h`
//! hashes to `zeros[h]`:
//!  - `zeros[0] = zero_leaf`
//!  - `zeros[h + 1] = hash2(zeros[h], zeros[h])`
//!
//! Every internal node is `hash2(left, right)`. Because the tree never deletes or reorders
//! leaves, two trees built from the same sequence of leaves are identical, no matter whether the
//! leaves were inserted one at a time or replayed with
//! [`IncrementalMerkleTree::from_commitments`].
//!
//! ## Staleness
//!
//! The tree only reports its own state. Whether that state matches the authoritative commitment
//! log is for the caller to check, by comparing [`IncrementalMerkleTree::root`] against the
//! remote root before building a proof on top of it.

mod hash;
mod macros;
mod tree;

pub use hash::{empty_root, zero_hashes};
pub use tree::{verify_proof, Error, IncrementalMerkleTree, MerkleProof, Result, MAX_DEPTH};
pub use zk_primitives::{hash2, Element};
