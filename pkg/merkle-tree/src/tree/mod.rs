use crate::{hash::zero_hashes, Element};

mod error;
mod insert;
mod path;

pub use error::{Error, Result};
pub use path::{verify_proof, MerkleProof};

#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

/// The largest supported tree depth
pub const MAX_DEPTH: usize = 32;

/// An append-only Merkle tree of fixed depth
///
/// Leaves are assigned indices `0, 1, 2, ...` in insertion order, and are never removed or
/// reordered:
///
/// ```rust
/// # use merkle_tree::*;
/// let mut tree = IncrementalMerkleTree::new(3).unwrap();
///
/// tree.insert(Element::new(10)).unwrap();
/// tree.insert(Element::new(20)).unwrap();
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.capacity(), 8);
/// assert_eq!(tree.leaf(1), Some(Element::new(20)));
/// ```
///
/// Two trees compare equal if they have the same depth, the same zero leaf, and the same leaves
/// in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalMerkleTree {
    depth: usize,
    /// `zeros[h]` is the hash of an empty subtree of height `h`
    zeros: Vec<Element>,
    /// `levels[0]` holds the leaves, `levels[depth]` holds the root once the tree is non-empty
    ///
    /// Level `h` only holds the nodes that have at least one real leaf below them, so it is
    /// always a prefix of the full level
    levels: Vec<Vec<Element>>,
}

impl IncrementalMerkleTree {
    /// Create an empty tree of the given depth, with [`Element::ZERO`] as the zero leaf
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let tree = IncrementalMerkleTree::new(20).unwrap();
    /// assert_eq!(tree.root(), empty_root(20).unwrap());
    ///
    /// assert!(matches!(IncrementalMerkleTree::new(0), Err(Error::InvalidDepth { depth: 0 })));
    /// assert!(matches!(IncrementalMerkleTree::new(33), Err(Error::InvalidDepth { depth: 33 })));
    /// ```
    pub fn new(depth: usize) -> Result<Self> {
        Self::with_zero_leaf(depth, Element::ZERO)
    }

    /// Create an empty tree of the given depth, filling empty slots with `zero_leaf`
    pub fn with_zero_leaf(depth: usize, zero_leaf: Element) -> Result<Self> {
        if !(1..=MAX_DEPTH).contains(&depth) {
            return Err(Error::InvalidDepth { depth });
        }

        Ok(Self {
            depth,
            zeros: zero_hashes(zero_leaf, depth),
            levels: vec![Vec::new(); depth + 1],
        })
    }

    /// The depth of this tree, i.e. the length of each inclusion proof
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The maximum number of leaves this tree can hold, `2^depth`
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u64 {
        1 << self.depth
    }

    /// The number of leaves inserted so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.levels[0].len() as u64
    }

    /// Whether no leaves have been inserted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Whether the tree has reached its [capacity](Self::capacity)
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// The hashes of empty subtrees, indexed by height
    ///
    /// `zeros()[0]` is the zero leaf and `zeros()[depth]` is the root of the empty tree
    #[inline]
    #[must_use]
    pub fn zeros(&self) -> &[Element] {
        &self.zeros
    }

    /// The root hash of the tree
    ///
    /// This value represents every leaf in the tree, and changes with every insert. For an empty
    /// tree it is `zeros()[depth]`
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let mut tree = IncrementalMerkleTree::new(20).unwrap();
    /// let empty = tree.root();
    ///
    /// tree.insert(Element::new(1)).unwrap();
    /// assert_ne!(tree.root(), empty);
    /// ```
    #[inline]
    #[must_use]
    pub fn root(&self) -> Element {
        self.levels[self.depth]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth])
    }

    /// The leaves in insertion order
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[Element] {
        &self.levels[0]
    }

    /// The leaf at `index`, if there is one
    #[inline]
    #[must_use]
    pub fn leaf(&self, index: u64) -> Option<Element> {
        let index = usize::try_from(index).ok()?;
        self.levels[0].get(index).copied()
    }

    /// The index of the first leaf equal to `leaf`
    ///
    /// This is a linear scan, intended for recovering the position of a known commitment after a
    /// resync
    #[must_use]
    pub fn position(&self, leaf: Element) -> Option<u64> {
        self.levels[0]
            .iter()
            .position(|l| *l == leaf)
            .map(|index| index as u64)
    }

    /// The node at `index` on `level`, or the empty subtree hash if that node has no leaves below
    /// it yet
    fn node(&self, level: usize, index: usize) -> Element {
        self.levels[level]
            .get(index)
            .copied()
            .unwrap_or(self.zeros[level])
    }
}
