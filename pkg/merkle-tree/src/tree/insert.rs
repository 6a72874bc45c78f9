use std::ops::Range;

use tracing::{debug, trace};

use super::{Error, IncrementalMerkleTree, Result};
use crate::{hash2, Element};

impl IncrementalMerkleTree {
    /// Append a leaf to the tree, returning the index it was assigned
    ///
    /// Only the `depth` nodes on the path from the new leaf to the root are recomputed.
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let mut tree = IncrementalMerkleTree::new(1).unwrap();
    ///
    /// assert_eq!(tree.insert(Element::new(1)).unwrap(), 0);
    /// assert_eq!(tree.insert(Element::new(2)).unwrap(), 1);
    /// assert_eq!(tree.root(), hash2(Element::new(1), Element::new(2)));
    ///
    /// // a tree of depth 1 only has 2 slots
    /// let error = tree.insert(Element::new(3)).unwrap_err();
    /// assert_eq!(error, Error::TreeFull { capacity: 2 });
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeFull`] if the tree already holds `2^depth` leaves. The tree is not
    /// modified in this case.
    pub fn insert(&mut self, leaf: Element) -> Result<u64> {
        let leaf_index = self.len();

        if self.is_full() {
            return Err(Error::TreeFull {
                capacity: self.capacity(),
            });
        }

        self.levels[0].push(leaf);

        let mut index = leaf_index as usize;
        let mut node = leaf;

        for level in 0..self.depth {
            let parent = match index % 2 {
                0 => hash2(node, self.node(level, index + 1)),
                _ => hash2(self.node(level, index - 1), node),
            };

            index /= 2;
            node = parent;

            let next = &mut self.levels[level + 1];
            match next.get_mut(index) {
                Some(slot) => *slot = parent,
                None => next.push(parent),
            }
        }

        trace!(leaf_index, %leaf, root = %node, "inserted leaf");

        Ok(leaf_index)
    }

    /// Append every leaf yielded by `leaves`, returning the range of indices they were assigned
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let mut tree = tree! { 4; 1u64 };
    ///
    /// let range = tree.extend((2..=4).map(Element::new)).unwrap();
    /// assert_eq!(range, 1..4);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeFull`] if the tree fills up. Leaves yielded before that point remain
    /// in the tree.
    pub fn extend<I>(&mut self, leaves: I) -> Result<Range<u64>>
    where
        I: IntoIterator<Item = Element>,
    {
        let start = self.len();

        for leaf in leaves {
            self.insert(leaf)?;
        }

        Ok(start..self.len())
    }

    /// Build a tree from scratch by inserting `commitments` in order
    ///
    /// This is used to resynchronize with the authoritative commitment log. The result is
    /// identical to a tree that saw the same leaves one [`insert`](Self::insert) at a time.
    ///
    /// ```rust
    /// # use merkle_tree::*;
    /// let leaves = [1, 2, 3].map(Element::new);
    ///
    /// let mut incremental = IncrementalMerkleTree::new(8).unwrap();
    /// for leaf in leaves {
    ///     incremental.insert(leaf).unwrap();
    /// }
    ///
    /// let rebuilt = IncrementalMerkleTree::from_commitments(leaves, 8).unwrap();
    /// assert_eq!(rebuilt, incremental);
    /// assert_eq!(rebuilt.root(), incremental.root());
    /// ```
    pub fn from_commitments<I>(commitments: I, depth: usize) -> Result<Self>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut tree = Self::new(depth)?;
        let range = tree.extend(commitments)?;

        debug!(depth, leaves = range.end, root = %tree.root(), "rebuilt tree from commitments");

        Ok(tree)
    }
}
