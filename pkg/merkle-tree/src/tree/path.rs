use std::iter::zip;

use super::{Error, IncrementalMerkleTree, Result};
use crate::Element;

/// An inclusion proof for a single leaf of an [`IncrementalMerkleTree`]
///
/// `path_elements[i]` is the sibling of the node at height `i` on the path from the leaf to the
/// root, and `path_indices[i]` says which side that sibling is on: `false` (0) means the sibling
/// is on the right, `true` (1) means it is on the left.
///
/// ```rust
/// # use merkle_tree::*;
/// let tree = tree! { 20; 1u64, 2u64, 3u64 };
/// let proof = tree.proof(2).unwrap();
///
/// assert_eq!(proof.leaf, Element::new(3));
/// assert_eq!(proof.path_elements.len(), 20);
/// assert!(proof.verify());
///
/// // the proof doesn't hold for a different leaf
/// assert_ne!(proof.compute_root(Element::new(4)), tree.root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MerkleProof {
    /// The leaf this proof is for
    pub leaf: Element,
    /// The index of the leaf in the tree
    pub leaf_index: u64,
    /// The siblings of the path from the leaf to the root, deepest first
    pub path_elements: Vec<Element>,
    /// For each sibling, whether it is on the left
    pub path_indices: Vec<bool>,
    /// The root of the tree when this proof was generated
    pub root: Element,
}

impl MerkleProof {
    /// Compute the root hash of the tree from this proof, with `leaf` in the proven slot
    ///
    /// Internally, this function calls [`zk_primitives::compute_merkle_root`]. See the docs for
    /// that function for more details
    #[must_use]
    pub fn compute_root(&self, leaf: Element) -> Element {
        let siblings = zip(
            self.path_elements.iter().copied(),
            self.path_indices.iter().copied(),
        );

        zk_primitives::compute_merkle_root(leaf, siblings)
    }

    /// Shorthand for [`verify_proof`]
    #[inline]
    #[must_use]
    pub fn verify(&self) -> bool {
        verify_proof(self)
    }

    /// The leaf index implied by `path_indices`, if the path is short enough to express one
    fn index_from_bits(&self) -> Option<u64> {
        if self.path_indices.len() > 64 {
            return None;
        }

        let index = self
            .path_indices
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, &bit)| acc | (u64::from(bit) << i));

        Some(index)
    }
}

/// Check a [`MerkleProof`]
///
/// The root is recomputed by folding `path_elements` and `path_indices` over `leaf` with
/// [`hash2`](crate::hash2), and compared against `root`. The proof is also rejected if the two
/// sequences have different lengths, or if `path_indices` doesn't spell out `leaf_index` in
/// binary (least significant bit first).
///
/// ```rust
/// # use merkle_tree::*;
/// let tree = tree! { 4; 1u64, 2u64 };
/// let mut proof = tree.proof(0).unwrap();
/// assert!(verify_proof(&proof));
///
/// proof.path_indices[0] = !proof.path_indices[0];
/// assert!(!verify_proof(&proof));
/// ```
#[must_use]
pub fn verify_proof(proof: &MerkleProof) -> bool {
    if proof.path_elements.len() != proof.path_indices.len() {
        return false;
    }

    if proof.index_from_bits() != Some(proof.leaf_index) {
        return false;
    }

    proof.compute_root(proof.leaf) == proof.root
}

impl IncrementalMerkleTree {
    /// Generate an inclusion proof for the leaf at `leaf_index`
    ///
    /// The proof is against the current root. Inserting more leaves changes the root, so older
    /// proofs stop verifying against the tree (though they still verify on their own, against
    /// the root they captured).
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let mut tree = tree! { 8; 1u64, 2u64 };
    /// let old_proof = tree.proof(0).unwrap();
    ///
    /// tree.insert(Element::new(3)).unwrap();
    /// let new_proof = tree.proof(0).unwrap();
    ///
    /// assert!(old_proof.verify());
    /// assert!(new_proof.verify());
    /// assert_ne!(old_proof.root, new_proof.root);
    ///
    /// assert!(matches!(tree.proof(3), Err(Error::InvalidLeafIndex { index: 3, leaf_count: 3 })));
    /// ```
    pub fn proof(&self, leaf_index: u64) -> Result<MerkleProof> {
        let leaf = self.leaf(leaf_index).ok_or(Error::InvalidLeafIndex {
            index: leaf_index,
            leaf_count: self.len(),
        })?;

        let mut path_elements = Vec::with_capacity(self.depth);
        let mut path_indices = Vec::with_capacity(self.depth);

        let mut index = leaf_index as usize;
        for level in 0..self.depth {
            path_elements.push(self.node(level, index ^ 1));
            path_indices.push(index % 2 == 1);
            index /= 2;
        }

        Ok(MerkleProof {
            leaf,
            leaf_index,
            path_elements,
            path_indices,
            root: self.root(),
        })
    }
}
