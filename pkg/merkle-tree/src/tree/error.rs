use super::MAX_DEPTH;

/// An error that can occur when building or querying an [`IncrementalMerkleTree`]
///
/// [`IncrementalMerkleTree`]: crate::IncrementalMerkleTree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested depth was outside `1..=MAX_DEPTH`
    #[error("tree depth must be between 1 and {max}, got {depth}", max = MAX_DEPTH)]
    InvalidDepth {
        /// The requested depth
        depth: usize,
    },

    /// Every leaf slot is already filled
    #[error("the tree is full ({capacity} leaves)")]
    TreeFull {
        /// The number of leaves the tree holds
        capacity: u64,
    },

    /// No leaf has been inserted at this index
    #[error("leaf index {index} is out of range, the tree has {leaf_count} leaves")]
    InvalidLeafIndex {
        /// The requested index
        index: u64,
        /// The number of leaves in the tree
        leaf_count: u64,
    },
}

/// Shorthand for a [`Result`](std::result::Result) with this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
